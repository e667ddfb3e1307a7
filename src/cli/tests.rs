use super::*;

fn parse(args: &[&str]) -> PlStandings {
    PlStandings::try_parse_from(std::iter::once("pl-standings").chain(args.iter().copied()))
        .unwrap()
}

#[test]
fn test_query_defaults() {
    let cli = parse(&["query"]);
    assert_eq!(cli.command.kpi_query(), Some(KpiQuery::default()));
}

#[test]
fn test_query_overrides() {
    let cli = parse(&[
        "query",
        "--start-year",
        "2020",
        "--end-year",
        "2021",
        "--team",
        "Chelsea FC",
        "--kpi",
        "goalsAgainst",
    ]);
    let query = cli.command.kpi_query().unwrap();

    assert_eq!(query.start_year, Year::new(2020));
    assert_eq!(query.end_year, Year::new(2021));
    assert_eq!(query.team_names, Some(vec!["Chelsea FC".to_string()]));
    assert_eq!(query.kpi_name, "goalsAgainst");
}

#[test]
fn test_query_all_teams() {
    let cli = parse(&["query", "--all-teams"]);
    assert_eq!(cli.command.kpi_query().unwrap().team_names, None);
}

#[test]
fn test_query_rejects_bad_year() {
    assert!(PlStandings::try_parse_from(["pl-standings", "query", "--start-year", "twenty"]).is_err());
}

#[test]
fn test_serve_default_addr() {
    match parse(&["serve"]).command {
        Commands::Serve { addr } => assert_eq!(addr.to_string(), "127.0.0.1:3000"),
        other => panic!("Expected Serve, got {other:?}"),
    }
}

#[test]
fn test_fetch_has_no_query() {
    assert_eq!(parse(&["fetch"]).command.kpi_query(), None);
}
