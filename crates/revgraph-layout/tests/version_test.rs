#[test]
fn version_matches_cargo_pkg_version() {
    assert_eq!(revgraph_layout::VERSION, env!("CARGO_PKG_VERSION"));
    assert!(!revgraph_layout::VERSION.is_empty());
}
