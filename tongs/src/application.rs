use anyhow::{Context, Result, bail};
use std::sync::Arc;
use tongs::cli::{Cli, Commands, FetchArgs, ScriptArgs};
use tongs::config::{TongsConfig, load_config};
use tongs::script::write_script;
use tongs::token::{CookieToken, StaticToken, TokenProvider};
use tongs::{DependentSelect, HttpTransport, Page, SelectElement, UpdateOutcome};

pub async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Commands::Script(args) => cmd_script(config, args)?,
        Commands::Fetch(args) => cmd_fetch(config, args).await?,
        Commands::Config => cmd_config(&config)?,
    }

    Ok(())
}

fn cmd_script(mut config: TongsConfig, args: ScriptArgs) -> Result<()> {
    if let Some(mode) = args.mode {
        config.mode = mode;
    }

    let path = write_script(&config, &args.out)
        .with_context(|| format!("failed to write script under {}", args.out.display()))?;
    println!("wrote {} ({} mode)", path.display(), config.mode);
    Ok(())
}

async fn cmd_fetch(mut config: TongsConfig, args: FetchArgs) -> Result<()> {
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    let cookie = args.cookie.unwrap_or_default();
    let page = Arc::new(
        Page::new()
            .with_select(SelectElement::new(config.source_id.clone()))
            .with_select(SelectElement::new(config.dependent_id.clone()))
            .with_cookie(cookie.clone()),
    );

    let tokens: Arc<dyn TokenProvider> = match args.csrf_token {
        Some(token) => Arc::new(StaticToken::new(token)),
        None => Arc::new(CookieToken::new(page.clone(), config.csrf_cookie.clone())),
    };
    let transport = HttpTransport::new(&config)
        .context("failed to build HTTP client")?
        .with_cookie(cookie);

    let updater =
        DependentSelect::attach(page.as_ref(), config.clone(), Arc::new(transport), tokens)?;

    let Some(event) = page.change(&config.source_id, &args.value) else {
        bail!("source control '#{}' is missing", config.source_id);
    };

    match updater.handle_change(&event.value).await {
        UpdateOutcome::Applied { .. } => {
            let dependent = page
                .element(&config.dependent_id)
                .context("dependent control disappeared")?;
            println!("{}", dependent.render());
            Ok(())
        }
        UpdateOutcome::Stale { sequence, latest } => {
            bail!("request #{sequence} was superseded by #{latest}")
        }
        UpdateOutcome::Failed { .. } => bail!("update failed; see log for details"),
    }
}

fn cmd_config(config: &TongsConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
