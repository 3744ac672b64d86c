use crate::output::print_json;
use readiness_core::routes::Page;

pub fn run(path: &str, json: bool) -> anyhow::Result<()> {
    let page = Page::resolve(path);

    if json {
        let mut body = serde_json::to_value(&page)?;
        if let Some(obj) = body.as_object_mut() {
            obj.insert("path".to_string(), serde_json::json!(page.path()));
            obj.insert("title".to_string(), serde_json::json!(page.title()));
            obj.insert("found".to_string(), serde_json::json!(!page.is_not_found()));
        }
        return print_json(&body);
    }

    if page.is_not_found() {
        anyhow::bail!("no page at '{path}'");
    }
    println!("{}  ({})", page.title(), page.path());
    Ok(())
}
