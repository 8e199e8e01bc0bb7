use crate::config::TongsConfig;
use crate::domain::{ACCEPT_JSON, REQUESTED_WITH, TransportMode};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// JS string literal for `s`.
fn js_str(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

pub fn on_dom_ready(blocks: &[String]) -> String {
    let body = blocks.join("\n");
    format!("document.addEventListener(\"DOMContentLoaded\", () => {{\n{body}\n}});")
}

pub fn get_cookie_fn() -> String {
    "function getCookie(name) {\n\
if (!document.cookie) {\n\
return null;\n\
}\n\
for (const part of document.cookie.split(';')) {\n\
const cookie = part.trim();\n\
if (cookie.startsWith(name + '=')) {\n\
return decodeURIComponent(cookie.substring(name.length + 1));\n\
}\n\
}\n\
return null;\n\
}"
    .to_string()
}

fn lookup_controls(config: &TongsConfig) -> String {
    format!(
        "const source = document.getElementById({source});\n\
const dependent = document.getElementById({dependent});\n\
if (!source || !dependent) {{\n\
console.error('dependent select: missing', {source}, {dependent});\n\
return;\n\
}}",
        source = js_str(&config.source_id),
        dependent = js_str(&config.dependent_id),
    )
}

fn fetch_call(config: &TongsConfig) -> String {
    let endpoint = js_str(&config.endpoint);
    let field = js_str(&config.field);
    let common_headers = format!(
        "'Accept': {},\n'X-Requested-With': {},",
        js_str(ACCEPT_JSON),
        js_str(REQUESTED_WITH)
    );

    match config.mode {
        TransportMode::Get => format!(
            "const url = {endpoint} + '?' + new URLSearchParams({{[{field}]: value}});\n\
return fetch(url, {{\n\
method: 'GET',\n\
headers: {{\n\
{common_headers}\n\
}},\n\
}});"
        ),
        TransportMode::Post => format!(
            "const headers = {{\n\
{common_headers}\n\
'Content-Type': {json},\n\
}};\n\
const token = getCookie({cookie});\n\
if (token !== null) {{\n\
headers[{header}] = token;\n\
}}\n\
return fetch({endpoint}, {{\n\
method: 'POST',\n\
credentials: 'same-origin',\n\
headers,\n\
body: JSON.stringify({{data: {{[{field}]: value}}}}),\n\
}});",
            json = js_str(ACCEPT_JSON),
            cookie = js_str(&config.csrf_cookie),
            header = js_str(&config.csrf_header),
        ),
    }
}

fn change_listener(config: &TongsConfig) -> String {
    let status_check = if config.check_status {
        "if (!response.ok) {\n\
throw new Error(`${response.status} ${response.statusText}`);\n\
}\n"
    } else {
        ""
    };
    let stale_check = if config.discard_stale {
        "if (sequence !== issued) {\nreturn;\n}\n"
    } else {
        ""
    };

    format!(
        "let issued = 0;\n\
function cell(value) {{\n\
if (typeof value !== 'string' && typeof value !== 'number') {{\n\
throw new Error(`unexpected option value: ${{value}}`);\n\
}}\n\
return String(value);\n\
}}\n\
function request(value) {{\n\
{fetch}\n\
}}\n\
source.addEventListener('change', (event) => {{\n\
const sequence = ++issued;\n\
request(event.target.value)\n\
.then(response => {{\n\
{status_check}return response.json();\n\
}})\n\
.then(payload => {{\n\
{stale_check}const options = [new Option({placeholder}, '')];\n\
payload.data.forEach(row => options.push(new Option(cell(row[1]), cell(row[0]))));\n\
dependent.replaceChildren(...options);\n\
}})\n\
.catch(error => {{\n\
console.error('Error:', error);\n\
}});\n\
}}, false);",
        fetch = fetch_call(config),
        placeholder = js_str(&config.placeholder_label),
    )
}

/// Browser rendition of the updater for the configured transport mode.
pub fn dependent_select_js(config: &TongsConfig) -> String {
    let mut blocks = Vec::new();
    if config.mode == TransportMode::Post {
        blocks.push(get_cookie_fn());
    }
    blocks.push(lookup_controls(config));
    blocks.push(change_listener(config));

    format!("'use strict';\n{}\n", on_dom_ready(&blocks))
}

/// Writes the asset to `<dist>/assets/js/<asset_name>`.
pub fn write_script(config: &TongsConfig, dist: &Path) -> std::io::Result<PathBuf> {
    let dir = dist.join("assets").join("js");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(&config.asset_name);
    std::fs::write(&path, dependent_select_js(config))?;
    Ok(path)
}
