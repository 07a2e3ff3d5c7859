use clap::Parser;

/// Runtime configuration, read from the environment (or CLI flags).
#[derive(Debug, Parser)]
#[command(name = "matchday", about = "Football prediction stats server")]
pub struct Config {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// League names eligible for the league stars card (comma-separated).
    /// Matched exactly against stored league names.
    #[arg(
        long,
        env = "FEATURED_LEAGUES",
        value_delimiter = ',',
        default_values_t = default_featured_leagues()
    )]
    pub featured_leagues: Vec<String>,
}

fn default_featured_leagues() -> Vec<String> {
    [
        "الدوري الإسباني",
        "الدوري الإنجليزي",
        "الدوري الألماني",
        "الدوري الفرنسي",
        "الدوري الإيطالي",
        "دوري أبطال أوروبا",
        "دوري روشن السعودي",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
