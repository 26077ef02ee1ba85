use std::path::PathBuf;

use clap::Parser;

use crate::i18n::Locale;

/// Submanifold Tour - animated differential geometry chapters
#[derive(Parser, Debug, Default)]
#[command(name = "submanifold-tour")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file; missing files fall back to defaults
    #[arg(short, long, value_name = "FILE", default_value = "submanifold-tour.json")]
    pub config: PathBuf,

    /// Chapter to open, e.g. `/geodesics`
    #[arg(short, long, value_name = "PATH")]
    pub route: Option<String>,

    /// Interface language
    #[arg(short, long, value_enum)]
    pub locale: Option<Locale>,

    /// Animation speed factor
    #[arg(short, long)]
    pub speed: Option<f32>,

    /// Write the effective config back to `--config` and exit
    #[arg(long)]
    pub write_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_overrides() {
        let cli = Cli::parse_from([
            "submanifold-tour",
            "--route",
            "/geodesics/",
            "--locale",
            "de",
            "--speed",
            "0.5",
        ]);
        assert_eq!(cli.route.as_deref(), Some("/geodesics/"));
        assert_eq!(cli.locale, Some(Locale::De));
        assert_eq!(cli.speed, Some(0.5));
        assert_eq!(cli.config, PathBuf::from("submanifold-tour.json"));
        assert!(!cli.write_config);
    }

    #[test]
    fn rejects_unknown_locale() {
        assert!(Cli::try_parse_from(["submanifold-tour", "--locale", "fr"]).is_err());
    }
}
