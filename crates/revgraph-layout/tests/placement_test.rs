use revgraph_layout::{
    GraphLayout, LayoutOptions, Margin, NodeId, RevisionAction, RevisionGraphBuilder, RevisionKey,
    placement,
};

fn add(b: &mut RevisionGraphBuilder, rev: u64, path: &str, action: RevisionAction) -> NodeId {
    b.add_node(RevisionKey::new(rev, path), action, 100.0, 20.0)
}

fn options() -> LayoutOptions {
    LayoutOptions {
        vertical_gap: 5.0,
        column_gap: 10.0,
        column_width: None,
        margin: Margin::uniform(0.0),
    }
}

fn place(b: RevisionGraphBuilder) -> GraphLayout {
    let g = b.build().unwrap();
    let mut layout = GraphLayout::for_graph(&g);
    placement::run(&g, &mut layout, &options());
    layout
}

#[test]
fn lane_successors_share_the_column_and_stack_rows() {
    let mut b = RevisionGraphBuilder::new();
    let r1 = add(&mut b, 1, "/trunk", RevisionAction::Add);
    let r2 = add(&mut b, 2, "/trunk", RevisionAction::Modify);
    let r3 = add(&mut b, 3, "/trunk", RevisionAction::Modify);
    b.set_next(r1, r2).set_next(r2, r3).set_root(r1);
    let layout = place(b);

    for id in [r1, r2, r3] {
        assert_eq!(layout[id].column, 0);
    }
    assert_eq!(layout[r1].row, 0.0);
    assert_eq!(layout[r2].row, 25.0);
    assert_eq!(layout[r3].row, 50.0);
}

#[test]
fn copy_targets_fan_out_to_the_right_in_child_order() {
    let mut b = RevisionGraphBuilder::new();
    let r = add(&mut b, 1, "/trunk", RevisionAction::Add);
    let a = add(&mut b, 2, "/branches/a", RevisionAction::Copy);
    let c = add(&mut b, 3, "/branches/b", RevisionAction::Copy);
    let d = add(&mut b, 4, "/branches/c", RevisionAction::Copy);
    b.add_copy(r, a).add_copy(r, c).add_copy(r, d).set_root(r);
    let layout = place(b);

    assert_eq!(layout[a].column, 1);
    assert_eq!(layout[c].column, 2);
    assert_eq!(layout[d].column, 3);
    for id in [a, c, d] {
        assert_eq!(layout[id].row, 25.0);
    }
}

#[test]
fn branch_columns_are_relative_to_the_source_column() {
    let mut b = RevisionGraphBuilder::new();
    let r1 = add(&mut b, 1, "/trunk", RevisionAction::Add);
    let r2 = add(&mut b, 2, "/trunk", RevisionAction::Modify);
    let a = add(&mut b, 3, "/branches/a", RevisionAction::Copy);
    let a2 = add(&mut b, 4, "/branches/a", RevisionAction::Modify);
    let x = add(&mut b, 5, "/tags/x", RevisionAction::Copy);
    let y = add(&mut b, 6, "/tags/y", RevisionAction::Copy);
    b.set_next(r1, r2)
        .add_copy(r2, a)
        .set_next(a, a2)
        .add_copy(a2, x)
        .add_copy(a2, y)
        .set_root(r1);
    let layout = place(b);

    assert_eq!(layout[a].column, 1);
    assert_eq!(layout[a].row, 50.0);
    assert_eq!(layout[a2].column, 1);
    assert_eq!(layout[a2].row, 75.0);
    assert_eq!(layout[x].column, 2);
    assert_eq!(layout[y].column, 3);
    assert_eq!(layout[x].row, 100.0);
    assert_eq!(layout[y].row, 100.0);
}

#[test]
fn rename_at_lane_end_continues_the_column() {
    let mut b = RevisionGraphBuilder::new();
    let r1 = add(&mut b, 1, "/trunk/a.c", RevisionAction::Add);
    let n1 = add(&mut b, 2, "/trunk/b.c", RevisionAction::Rename);
    let n2 = add(&mut b, 3, "/trunk/b.c", RevisionAction::Modify);
    b.add_copy(r1, n1).set_next(n1, n2).set_root(r1);
    let layout = place(b);

    assert_eq!(layout[n1].column, 0);
    assert_eq!(layout[n1].row, 25.0);
    assert_eq!(layout[n2].column, 0);
    assert_eq!(layout[n2].row, 50.0);
}

#[test]
fn sole_rename_shares_the_column_when_the_source_goes_on() {
    let mut b = RevisionGraphBuilder::new();
    let r1 = add(&mut b, 1, "/trunk/a.c", RevisionAction::Add);
    let r2 = add(&mut b, 2, "/trunk/a.c", RevisionAction::Delete);
    let n1 = add(&mut b, 2, "/trunk/b.c", RevisionAction::Rename);
    b.set_next(r1, r2).add_copy(r1, n1).set_root(r1);
    let layout = place(b);

    assert_eq!(layout[r2].column, 0);
    assert_eq!(layout[n1].column, 0);
    assert_eq!(layout[n1].row, 25.0);
}

#[test]
fn leading_rename_does_not_push_copies_right() {
    let mut b = RevisionGraphBuilder::new();
    let r = add(&mut b, 1, "/trunk/a.c", RevisionAction::Add);
    let n = add(&mut b, 2, "/trunk/b.c", RevisionAction::Rename);
    let a = add(&mut b, 3, "/branches/a/a.c", RevisionAction::Modify);
    let c = add(&mut b, 4, "/branches/c/a.c", RevisionAction::Copy);
    b.add_copy(r, n).add_copy(r, a).add_copy(r, c).set_root(r);
    let layout = place(b);

    assert_eq!(layout[n].column, 0);
    assert_eq!(layout[a].column, 1);
    assert_eq!(layout[c].column, 2);
}

#[test]
fn rename_between_copies_keeps_the_source_column() {
    let mut b = RevisionGraphBuilder::new();
    let r1 = add(&mut b, 1, "/trunk/a.c", RevisionAction::Add);
    let r2 = add(&mut b, 2, "/trunk/a.c", RevisionAction::Modify);
    let a = add(&mut b, 3, "/branches/a/a.c", RevisionAction::Copy);
    let n = add(&mut b, 4, "/trunk/b.c", RevisionAction::Rename);
    let c = add(&mut b, 5, "/branches/c/a.c", RevisionAction::Copy);
    b.set_next(r1, r2)
        .add_copy(r2, a)
        .add_copy(r2, n)
        .add_copy(r2, c)
        .set_root(r1);
    let layout = place(b);

    assert_eq!(layout[a].column, 1);
    assert_eq!(layout[n].column, 0);
    assert_eq!(layout[c].column, 2);
}

#[test]
fn rows_account_for_node_heights() {
    let mut b = RevisionGraphBuilder::new();
    let r1 = b.add_node(RevisionKey::new(1, "/trunk"), RevisionAction::Add, 80.0, 40.0);
    let r2 = b.add_node(RevisionKey::new(2, "/trunk"), RevisionAction::Modify, 80.0, 10.0);
    let r3 = b.add_node(RevisionKey::new(3, "/trunk"), RevisionAction::Modify, 80.0, 10.0);
    b.set_next(r1, r2).set_next(r2, r3).set_root(r1);
    let layout = place(b);

    assert_eq!(layout[r2].row, 45.0);
    assert_eq!(layout[r3].row, 60.0);
}
