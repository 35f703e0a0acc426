//! Command line arguments.

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Xen Orchestra dynamic inventory for Ansible.
#[derive(Parser, Debug)]
#[command(name = "xo-inventory", version)]
#[command(about = "XenOrchestra Ansible Dynamic Inventory source.")]
#[command(group(ArgGroup::new("action").required(true).args(["list", "host"])))]
pub struct Args {
    /// List all hosts
    #[arg(long)]
    pub list: bool,

    /// Get hostvars for host
    #[arg(long, value_name = "NAME")]
    pub host: Option<String>,

    /// Env-style config file [default: xenorchestra.env next to the binary, then .env]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read objects from a JSON dump instead of the Xen Orchestra API
    #[arg(long, value_name = "FILE")]
    pub objects_file: Option<PathBuf>,
}

/// What to print.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    List,
    Host(String),
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn action(&self) -> Action {
        match &self.host {
            Some(host) => Action::Host(host.clone()),
            None => Action::List,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_list() {
        let args = Args::try_parse_from(["xo-inventory", "--list"]).unwrap();
        assert_eq!(args.action(), Action::List);
    }

    #[test]
    fn test_host() {
        let args = Args::try_parse_from(["xo-inventory", "--host", "web01"]).unwrap();
        assert_eq!(args.action(), Action::Host("web01".to_string()));
    }

    #[test]
    fn test_action_required() {
        let err = Args::try_parse_from(["xo-inventory"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_list_and_host_conflict() {
        let err = Args::try_parse_from(["xo-inventory", "--list", "--host", "web01"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_files() {
        let args = Args::try_parse_from([
            "xo-inventory",
            "--list",
            "--config",
            "/etc/ansible/xenorchestra.env",
            "--objects-file",
            "objects.json",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/etc/ansible/xenorchestra.env")));
        assert_eq!(args.objects_file, Some(PathBuf::from("objects.json")));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
