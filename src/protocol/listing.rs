use std::fs;
use std::io;
use std::path::Path;

/// Renders a directory as the minimal listing page the report's
/// link-following code was written against: a title/heading pair naming the
/// request path and one `<li><a>` per visible entry. Directory entries get a
/// trailing slash in both the href and the text.
pub fn render(dir: &Path, request_path: &str) -> io::Result<String> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push((name, is_dir));
    }
    entries.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));

    let links = entries
        .iter()
        .map(|(name, is_dir)| {
            let suffix = if *is_dir { "/" } else { "" };
            let encoded = urlencoding::encode(name);
            format!("<li><a href=\"{encoded}{suffix}\">{name}{suffix}</a></li>")
        })
        .collect::<Vec<_>>()
        .join("\n");

    Ok(format!(
        "<!DOCTYPE html>\n\
         <html><head><title>Directory listing for {request_path}</title></head>\n\
         <body><h1>Directory listing for {request_path}</h1>\n\
         <ul>{links}</ul>\n\
         </body></html>"
    ))
}
