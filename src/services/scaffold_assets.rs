use include_dir::{Dir, DirEntry, include_dir};
use minijinja::{Environment, UndefinedBehavior, context};

use crate::domain::AppError;

static SCAFFOLD_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/scaffold");
static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

const TEMPLATE_SUFFIX: &str = ".j2";

/// A rendered file destined for the config directory.
#[derive(Debug, Clone)]
pub struct ScaffoldFile {
    /// Path relative to the config directory.
    pub path: String,
    pub content: String,
}

/// Render the starter config directory.
pub fn scaffold_files(env: &str, owner: &str) -> Result<Vec<ScaffoldFile>, AppError> {
    let ctx = context! { env => env, owner => owner };
    let mut files = Vec::new();
    collect(&SCAFFOLD_DIR, &ctx, &mut files)?;
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Render a new per-domain document.
pub fn render_domain_template(display_name: &str, tags: &[String]) -> Result<String, AppError> {
    let file = TEMPLATES_DIR
        .get_file("domain.toml.j2")
        .ok_or_else(|| AppError::InternalError("Missing embedded domain template".into()))?;
    let content = utf8(file.contents_utf8(), "domain.toml.j2")?;
    render("domain.toml.j2", content, &context! { display_name => display_name, tags => tags })
}

fn collect(dir: &Dir, ctx: &minijinja::Value, files: &mut Vec<ScaffoldFile>) -> Result<(), AppError> {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                let path = file.path().to_string_lossy().to_string();
                let content = utf8(file.contents_utf8(), &path)?;
                let (path, content) = match path.strip_suffix(TEMPLATE_SUFFIX) {
                    Some(target) => (target.to_string(), render(&path, content, ctx)?),
                    None => (path, content.to_string()),
                };
                files.push(ScaffoldFile { path, content });
            }
            DirEntry::Dir(subdir) => collect(subdir, ctx, files)?,
        }
    }
    Ok(())
}

fn utf8<'a>(content: Option<&'a str>, path: &str) -> Result<&'a str, AppError> {
    content.ok_or_else(|| AppError::InternalError(format!("Scaffold file is not UTF-8: {}", path)))
}

fn render(name: &str, content: &str, ctx: &minijinja::Value) -> Result<String, AppError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template(name, content)
        .map_err(|err| AppError::InternalError(format!("Failed to load template {}: {}", name, err)))?;
    env.get_template(name)
        .and_then(|template| template.render(ctx))
        .map_err(|err| AppError::InternalError(format!("Failed to render template {}: {}", name, err)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GlobalConfig;

    #[test]
    fn scaffold_renders_parseable_documents() {
        let files = scaffold_files("dev", "data-team").unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["config.toml", "domains/example.toml"]);

        let config: GlobalConfig = toml::from_str(&files[0].content).unwrap();
        assert_eq!(config.env, "dev");
        assert!(config.schedules.contains_key("nightly"));

        let domain: toml::Value = toml::from_str(&files[1].content).unwrap();
        assert_eq!(domain["params"]["owner"].as_str(), Some("data-team"));
        assert_eq!(domain["schedule"].as_str(), Some("nightly"));
    }

    #[test]
    fn domain_template_lists_tags() {
        let rendered =
            render_domain_template("Sales", &["daily".to_string(), "critical".to_string()]).unwrap();
        let value: toml::Value = toml::from_str(&rendered).unwrap();
        assert_eq!(value["display_name"].as_str(), Some("Sales"));
        assert_eq!(value["tags"].as_array().map(Vec::len), Some(2));
    }
}
