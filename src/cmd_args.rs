use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Routes file (INI). Defaults to $CORONA_ROUTES_PATH or ~/.corona/routes.
    #[clap(short = 'r', long, help = "routes file path")]
    routes: Option<String>,

    /// Fetch a JSON array from this URL into a collection and print it
    #[clap(short = 'f', long, help = "collection URL to fetch")]
    fetch: Option<String>,

    /// Hashes to navigate to, in order
    #[clap(value_name = "HASH")]
    hashes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    routes: Option<String>,
    fetch: Option<String>,
    hashes: Vec<String>,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            routes: args.routes,
            fetch: args.fetch,
            hashes: args.hashes,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn routes(&self) -> Option<&str> {
        self.routes.as_deref()
    }

    pub fn fetch(&self) -> Option<&str> {
        self.fetch.as_deref()
    }

    pub fn hashes(&self) -> &[String] {
        &self.hashes
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args_defaults() {
        let args = CommandLineArgs::parse_from(["corona"]);
        assert_eq!(args.routes(), None);
        assert_eq!(args.fetch(), None);
        assert!(args.hashes().is_empty());
    }

    #[test]
    fn test_parse_args_long_flags_and_hashes() {
        let args = CommandLineArgs::parse_from([
            "corona",
            "--routes",
            "/tmp/routes",
            "--fetch",
            "http://localhost/items",
            "users/1",
            "#files/a/b",
        ]);
        assert_eq!(args.routes(), Some("/tmp/routes"));
        assert_eq!(args.fetch(), Some("http://localhost/items"));
        assert_eq!(args.hashes(), ["users/1", "#files/a/b"]);
    }

    #[test]
    fn test_parse_args_short_flags() {
        let args = CommandLineArgs::parse_from(["corona", "-r", "routes.ini", "home"]);
        assert_eq!(args.routes(), Some("routes.ini"));
        assert_eq!(args.hashes(), ["home"]);
    }
}
