use tongs::html::{html_escape, select_markup};
use tongs::{Document, Page, SelectControl, SelectElement, SelectOption};

#[test]
fn test_select_markup() {
    let html = select_markup(
        "id_ido_syumoku",
        &[
            SelectOption::placeholder("---------"),
            SelectOption::new("1", "Foo"),
        ],
    );
    assert_eq!(
        html,
        "<select id=\"id_ido_syumoku\" name=\"ido_syumoku\">\
<option value=\"\">---------</option>\
<option value=\"1\">Foo</option></select>"
    );
}

#[test]
fn test_labels_are_escaped() {
    let html = select_markup("s", &[SelectOption::new("\"x\"", "<b>&</b>")]);
    assert!(html.contains("value=\"&quot;x&quot;\""));
    assert!(html.contains("&lt;b&gt;&amp;&lt;/b&gt;"));
    assert_eq!(html_escape("'"), "&#39;");
}

#[test]
fn test_replace_options_is_one_mutation() {
    let element = SelectElement::new("dep").with_options(vec![SelectOption::new("a", "A")]);
    assert_eq!(element.revision(), 0);

    element.replace_options(vec![SelectOption::new("b", "B"), SelectOption::new("c", "C")]);

    assert_eq!(element.revision(), 1);
    assert_eq!(element.options().len(), 2);
    assert_eq!(
        element.render(),
        "<select id=\"dep\" name=\"dep\">\
<option value=\"b\">B</option><option value=\"c\">C</option></select>"
    );
}

#[test]
fn test_page_lookup_and_change() {
    let page = Page::new().with_select(SelectElement::new("id_ido_type"));

    assert!(page.select_by_id("id_ido_type").is_some());
    assert!(page.select_by_id("missing").is_none());

    let event = page.change("id_ido_type", "05").unwrap();
    assert_eq!(event.target_id, "id_ido_type");
    assert_eq!(event.value, "05");
    assert_eq!(page.select_by_id("id_ido_type").unwrap().value(), "05");
    assert!(page.change("missing", "x").is_none());
}
