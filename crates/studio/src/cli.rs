use clap::{Parser, Subcommand};
use color_eyre::Result;
use studio_core::catalog::{self, Template};

#[derive(Parser, Debug)]
#[command(name = "studio", version, about = "Build a browser game from a template, step by step")]
pub struct Cli {
    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 30.0)]
    pub frame_rate: f64,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Run the interactive wizard (default)
    Run,
    /// Print the template catalog and exit
    Templates {
        #[arg(long)]
        json: bool,
    },
}

pub fn render_templates(json: bool) -> Result<String> {
    let templates = catalog::templates();
    if json {
        return Ok(serde_json::to_string_pretty(templates)?);
    }
    Ok(templates.iter().map(describe).collect::<Vec<_>>().join("\n"))
}

fn describe(t: &Template) -> String {
    let assets = t
        .required_assets
        .iter()
        .map(|a| format!("{} ({})", a.name, a.kind))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} {:<18} [{}] {}\n    mechanics: {}\n    assets:    {}",
        t.preview,
        t.id,
        t.category,
        t.description,
        t.mechanics.join(", "),
        assets
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["studio"]).unwrap();
        assert_eq!(cli.cmd, None);
        assert_eq!(cli.tick_rate, 4.0);
    }

    #[test]
    fn templates_json_flag() {
        let cli = Cli::try_parse_from(["studio", "templates", "--json"]).unwrap();
        assert_eq!(cli.cmd, Some(Cmd::Templates { json: true }));
    }

    #[test]
    fn json_listing_has_all_templates() {
        let out = render_templates(true).unwrap();
        let parsed: Vec<Template> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 4);
        assert_eq!(parsed[0].id, "endless-runner");
    }

    #[test]
    fn text_listing_names_every_id() {
        let out = render_templates(false).unwrap();
        for t in catalog::templates() {
            assert!(out.contains(&t.id), "{} missing", t.id);
        }
    }
}
