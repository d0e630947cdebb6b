// Template engine for report output

use crate::config::ChangeFreq;
use crate::error::Result;
use crate::index::PageIndexEntry;
use crate::output::stats::BuildStats;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

/// Template engine wrapping Tera with custom filters and templates
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create a new template engine with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("sitemap.xml", include_str!("../../templates/sitemap.xml.tera")),
            ("stats.txt", include_str!("../../templates/stats.txt.tera")),
        ])?;
        // escaping is explicit via xml_escape
        tera.autoescape_on(vec![]);
        register_filters(&mut tera);

        Ok(Self { tera })
    }

    /// Create a template engine from a custom directory
    pub fn from_dir(template_dir: &str) -> Result<Self> {
        let pattern = format!("{}/**/*.tera", template_dir);
        let mut tera = Tera::new(&pattern)?;
        tera.autoescape_on(vec![]);
        register_filters(&mut tera);

        Ok(Self { tera })
    }

    /// Render the XML sitemap for the given entries
    pub fn render_sitemap(
        &self,
        base_url: &str,
        changefreq: ChangeFreq,
        entries: &[&PageIndexEntry],
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("base_url", base_url);
        context.insert("changefreq", changefreq.as_str());
        context.insert("entries", entries);

        Ok(self.tera.render("sitemap.xml", &context)?)
    }

    /// Render the plain-text build statistics
    pub fn render_stats(&self, stats: &BuildStats) -> Result<String> {
        let context = Context::from_serialize(stats)?;
        Ok(self.tera.render("stats.txt", &context)?)
    }

    /// Render a custom template with context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Get the underlying Tera instance for advanced usage
    pub fn tera(&self) -> &Tera {
        &self.tera
    }
}

fn register_filters(tera: &mut Tera) {
    tera.register_filter("pluralize", pluralize);
    tera.register_filter("sitemap_priority", sitemap_priority);
    tera.register_filter("xml_escape", xml_escape_filter);
}

/// Pluralize a word based on count
fn pluralize(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let count = value.as_u64().unwrap_or(0);
    let singular = args
        .get("singular")
        .and_then(|v| v.as_str())
        .unwrap_or("item");
    let default_plural = format!("{}s", singular);
    let plural = args
        .get("plural")
        .and_then(|v| v.as_str())
        .unwrap_or(&default_plural);

    if count == 1 {
        Ok(Value::String(format!("{} {}", count, singular)))
    } else {
        Ok(Value::String(format!("{} {}", count, plural)))
    }
}

/// Page priority 1-10 as a sitemap priority 0.1-1.0
fn sitemap_priority(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let priority = value
        .as_u64()
        .ok_or_else(|| tera::Error::msg("sitemap_priority expects an integer"))?;
    Ok(Value::String(format_priority(priority)))
}

pub fn format_priority(priority: u64) -> String {
    format!("{:.1}", priority.min(10) as f64 / 10.0)
}

fn xml_escape_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value.as_str().unwrap_or("");
    Ok(Value::String(xml_escape(s)))
}

/// Escape XML special characters
pub fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
