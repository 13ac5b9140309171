use clap::{Subcommand, ValueEnum};
use planner::{Dialect, MySql, Postgres};

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one filter expression into a SQL predicate
    Convert {
        #[arg(long, help = "JSON config file declaring fields, limits and access rules")]
        config: String,

        #[arg(long, help = "Filter expression to convert")]
        expr: String,

        /// Caller role; repeat for several. Enables field authorization.
        #[arg(long = "role")]
        roles: Vec<String>,

        #[arg(long, value_enum, default_value_t = DialectKind::Postgres)]
        dialect: DialectKind,

        #[arg(long, help = "Print the result as JSON instead of plain text")]
        json: bool,

        #[arg(
            long,
            help = "If specified, writes the JSON result to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// List the fields declared by a config file
    Fields {
        #[arg(long, help = "JSON config file")]
        config: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectKind {
    Postgres,
    Mysql,
}

impl DialectKind {
    pub fn dialect(&self) -> &'static dyn Dialect {
        match self {
            DialectKind::Postgres => &Postgres,
            DialectKind::Mysql => &MySql,
        }
    }
}
