use super::*;
use clap::Parser;

#[test]
fn global_options_default_to_current_directory() {
    let cli = Cli::try_parse_from(["docweave", "plan"]).expect("parse");
    assert_eq!(cli.root, PathBuf::from("."));
    assert!(cli.config.is_none());
    assert!(!cli.verbose);
    assert!(matches!(cli.command, Commands::Plan));
}

#[test]
fn search_parses_query_and_limit() {
    let cli = Cli::try_parse_from([
        "docweave",
        "--root",
        "/data/docs",
        "search",
        "dimensional game theory",
        "--limit",
        "3",
    ])
    .expect("parse");
    assert_eq!(cli.root, PathBuf::from("/data/docs"));
    match cli.command {
        Commands::Search(SearchArgs { query, limit }) => {
            assert_eq!(query, "dimensional game theory");
            assert_eq!(limit, 3);
        }
        _ => panic!("expected search command"),
    }
}

#[test]
fn search_limit_defaults_to_ten() {
    let cli = Cli::try_parse_from(["docweave", "search", "bayesian"]).expect("parse");
    match cli.command {
        Commands::Search(args) => assert_eq!(args.limit, 10),
        _ => panic!("expected search command"),
    }
}

#[test]
fn traverse_order_accepts_bfs_and_dfs_only() {
    let cli = Cli::try_parse_from(["docweave", "traverse", "--order", "dfs"]).expect("parse");
    match cli.command {
        Commands::Traverse(TraverseArgs { order }) => assert_eq!(order, TraversalOrder::Dfs),
        _ => panic!("expected traverse command"),
    }
    assert!(Cli::try_parse_from(["docweave", "traverse", "--order", "random"]).is_err());
}

#[test]
fn reorganize_requires_target_and_parses_dry_run() {
    assert!(Cli::try_parse_from(["docweave", "reorganize"]).is_err());

    let cli = Cli::try_parse_from([
        "docweave",
        "reorganize",
        "--target",
        "/tmp/out",
        "--dry-run",
        "--verbose",
    ])
    .expect("parse");
    assert!(cli.verbose);
    match cli.command {
        Commands::Reorganize(ReorganizeArgs { target, dry_run }) => {
            assert_eq!(target, PathBuf::from("/tmp/out"));
            assert!(dry_run);
        }
        _ => panic!("expected reorganize command"),
    }
}

#[test]
fn index_export_is_optional() {
    let cli = Cli::try_parse_from(["docweave", "--config", "dw.toml", "index", "--export", "m.json"])
        .expect("parse");
    assert_eq!(cli.config, Some(PathBuf::from("dw.toml")));
    match cli.command {
        Commands::Index(IndexArgs { export }) => {
            assert_eq!(export, Some(PathBuf::from("m.json")));
        }
        _ => panic!("expected index command"),
    }
}
