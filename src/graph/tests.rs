use super::*;

#[derive(Debug, Clone)]
struct Node {
    id: String,
    parents: Vec<String>,
}

impl GraphCommit for Node {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }

    fn parent_ids(&self) -> &[String] {
        &self.parents
    }
}

fn node(id: &str, parents: &[&str]) -> Node {
    Node {
        id: id.to_string(),
        parents: parents.iter().map(|p| p.to_string()).collect(),
    }
}

/// Palette entry that prefixes each glyph with its palette index.
struct Tag(u8);

impl ColorToken for Tag {
    fn paint(&self, glyph: char) -> String {
        format!("{}{}", self.0, glyph)
    }
}

fn plain_graph(colors: usize) -> Graph<String, NoColor> {
    let mut graph = Graph::new();
    graph.set_palette(vec![NoColor; colors]).unwrap();
    graph
}

/// Lines emitted for one commit, with the state each line was drawn in.
fn drain<C: ColorToken>(graph: &mut Graph<String, C>) -> Vec<(GraphState, RenderedLine)> {
    let mut out = Vec::new();
    while !graph.is_commit_finished() {
        let state = graph.state();
        out.push((state, graph.next_line().unwrap()));
        assert!(out.len() < 64, "commit never finished");
    }
    out
}

fn render(history: &[Node], colors: usize) -> Vec<Vec<String>> {
    let mut graph = plain_graph(colors);
    history
        .iter()
        .map(|commit| {
            graph.update(commit).unwrap();
            drain(&mut graph).into_iter().map(|(_, l)| l.text).collect()
        })
        .collect()
}

fn merge_history() -> Vec<Node> {
    vec![node("C", &["A", "B"]), node("B", &["A"]), node("A", &[])]
}

fn octopus_history() -> Vec<Node> {
    vec![
        node("T", &["M", "Q"]),
        node("M", &["P1", "P2", "P3"]),
        node("Q", &["P1"]),
        node("P3", &["P1"]),
        node("P2", &["P1"]),
        node("P1", &[]),
    ]
}

#[test]
fn test_linear_history_stays_in_one_lane() {
    let history = vec![node("C", &["B"]), node("B", &["A"]), node("A", &[])];
    let mut graph = plain_graph(3);
    let mut lines = Vec::new();

    for commit in &history {
        graph.update(commit).unwrap();
        let drained = drain(&mut graph);
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].0, GraphState::Commit);
        assert!(drained[0].1.is_commit);
        assert!(graph.lanes() <= 1);
        lines.push(drained[0].1.text.clone());
    }

    assert_eq!(lines, ["T ", "* ", "R "]);
}

#[test]
fn test_two_parent_merge() {
    let history = merge_history();
    let mut graph = plain_graph(3);

    graph.update(&history[0]).unwrap();
    let merge = drain(&mut graph);
    let states: Vec<_> = merge.iter().map(|(s, _)| *s).collect();
    assert_eq!(states, [GraphState::Commit, GraphState::PostMerge]);
    assert_eq!(merge[0].1.text, "T   ");
    assert!(merge[0].1.is_commit);
    assert_eq!(merge[1].1.text, "|\\  ");
    assert!(!merge[1].1.is_commit);
    assert_eq!(graph.lanes(), 2);

    graph.update(&history[1]).unwrap();
    let side = drain(&mut graph);
    let states: Vec<_> = side.iter().map(|(s, _)| *s).collect();
    assert_eq!(states, [GraphState::Commit, GraphState::Collapsing]);
    assert_eq!(side[0].1.text, "| * ");
    assert_eq!(side[1].1.text, "|/  ");

    graph.update(&history[2]).unwrap();
    let root = drain(&mut graph);
    assert_eq!(root.len(), 1);
    assert_eq!(root[0].1.text, "R ");
}

#[test]
fn test_merge_edges_take_parent_colors() {
    let mut graph: Graph<String, Tag> = Graph::new();
    graph.set_palette(vec![Tag(0), Tag(1), Tag(2)]).unwrap();

    graph.update(&node("C", &["A", "B"])).unwrap();
    let lines = drain(&mut graph);
    assert_eq!(lines[0].1.text, "2T   ");
    assert_eq!(lines[1].1.text, "1|2\\  ");
    assert_eq!(lines[1].1.width, 4);
}

#[test]
fn test_octopus_merge_expands_before_commit() {
    let history = octopus_history();
    let mut graph = plain_graph(5);

    graph.update(&history[0]).unwrap();
    drain(&mut graph);

    graph.update(&history[1]).unwrap();
    assert_eq!(graph.state(), GraphState::PreCommit);
    // Three parents slanting right: 2 * (3 + 1 - 3) expansion rows.
    assert_eq!(graph.num_expansion_rows(), 2);

    let lines = drain(&mut graph);
    let states: Vec<_> = lines.iter().map(|(s, _)| *s).collect();
    assert_eq!(
        states,
        [
            GraphState::PreCommit,
            GraphState::PreCommit,
            GraphState::Commit,
            GraphState::PostMerge
        ]
    );
    let text: Vec<_> = lines.iter().map(|(_, l)| l.text.as_str()).collect();
    assert_eq!(text, ["| \\     ", "|  \\    ", "*-. |   ", "|\\ \\ \\  "]);
    assert_eq!(lines.iter().filter(|(_, l)| l.is_commit).count(), 1);
    assert_eq!(graph.lanes(), 4);
}

#[test]
fn test_octopus_history_drains_every_commit() {
    let lines = render(&octopus_history(), 5);
    assert_eq!(lines.len(), 6);
    assert!(lines.iter().all(|commit| !commit.is_empty()));
    assert_eq!(lines[5].last().map(String::as_str), Some("R "));
}

#[test]
fn test_root_commit_reserves_width() {
    let mut graph = plain_graph(2);
    graph.update(&node("A", &[])).unwrap();
    assert_eq!(graph.width(), 2);
    assert_eq!(graph.lanes(), 0);

    let lines = drain(&mut graph);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].1.text, "R ");
}

#[test]
fn test_diamond_history() {
    let history = vec![
        node("E", &["D", "C"]),
        node("D", &["B"]),
        node("C", &["B"]),
        node("B", &["A"]),
        node("A", &[]),
    ];
    let lines = render(&history, 4);
    assert_eq!(
        lines,
        vec![
            vec!["T   ", "|\\  "],
            vec!["* | "],
            vec!["| * ", "|/  "],
            vec!["* "],
            vec!["R "],
        ]
    );
}

#[test]
fn test_collapse_bridges_over_lanes() {
    let history = vec![
        node("W", &["A"]),
        node("X", &["X0"]),
        node("Y", &["Y0"]),
        node("Z", &["A"]),
    ];
    let lines = render(&history, 3);
    assert_eq!(lines[0], ["T "]);
    assert_eq!(lines[1], ["| T "]);
    assert_eq!(lines[2], ["| | T "]);
    assert_eq!(lines[3], ["| | | T ", "| |_|/  ", "|/| |   "]);
}

#[test]
fn test_commit_line_continues_collapse() {
    let history = vec![
        node("c0", &["c2", "c3"]),
        node("c1", &["c3"]),
        node("c2", &["c3"]),
        node("c3", &[]),
    ];
    let lines = render(&history, 3);
    assert_eq!(
        lines,
        vec![
            vec!["T   ", "|\\  "],
            vec!["| | T ", "| |/  "],
            vec!["* / ", "|/  "],
            vec!["R "],
        ]
    );
}

#[test]
fn test_octopus_after_lane_reuse_is_reported() {
    let mut graph = plain_graph(5);
    for commit in [node("X", &["A"]), node("Y", &["B"]), node("Z", &["M"])] {
        graph.update(&commit).unwrap();
        drain(&mut graph);
    }

    graph.update(&node("M", &["A", "B", "C", "D"])).unwrap();
    let err = loop {
        match graph.next_line() {
            Ok(_) => assert!(!graph.is_commit_finished(), "octopus drew without error"),
            Err(err) => break err,
        }
    };
    match err {
        GraphError::MappingInvariant { check, snapshot, .. } => {
            assert_eq!(check, "octopus parent cell is mapped");
            assert_eq!(snapshot.state, GraphState::Commit);
            assert_eq!(snapshot.num_parents, 4);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_lines_of_a_commit_share_width() {
    for history in [merge_history(), octopus_history()] {
        let mut graph = plain_graph(5);
        for commit in &history {
            graph.update(commit).unwrap();
            let width = graph.width();
            for (_, line) in drain(&mut graph) {
                assert_eq!(line.width, width);
                assert_eq!(line.text.chars().count(), width);
            }
        }
    }
}

#[test]
fn test_update_before_drain_emits_skip_line() {
    let mut graph = plain_graph(3);
    graph.update(&node("C", &["A", "B"])).unwrap();
    assert!(!graph.is_commit_finished());

    graph.update(&node("B", &["A"])).unwrap();
    assert_eq!(graph.state(), GraphState::Skip);

    let lines = drain(&mut graph);
    let text: Vec<_> = lines.iter().map(|(_, l)| l.text.as_str()).collect();
    assert_eq!(text, ["... ", "| * ", "|/  "]);
    assert!(!lines[0].1.is_commit);
    assert!(lines[1].1.is_commit);
}

#[test]
fn test_finished_iff_padding() {
    let mut graph = plain_graph(2);
    assert!(graph.is_commit_finished());
    graph.update(&node("C", &["A", "B"])).unwrap();
    while graph.state() != GraphState::Padding {
        assert!(!graph.is_commit_finished());
        graph.next_line().unwrap();
    }
    assert!(graph.is_commit_finished());
}

#[test]
fn test_replay_is_deterministic() {
    let history: Vec<Node> = octopus_history()
        .into_iter()
        .chain(std::iter::once(node("Z", &["P1"])))
        .collect();
    assert_eq!(render(&history, 5), render(&history, 5));
}

#[test]
fn test_mirror_preserves_line_length() {
    for commit in render(&octopus_history(), 5) {
        for line in commit {
            assert_eq!(mirror(&line).len(), line.len());
        }
    }
}

#[test]
fn test_capacity_grows_past_initial_size() {
    let mut graph: Graph<String, NoColor> = Graph::with_capacity(1);
    graph.set_palette(vec![NoColor, NoColor]).unwrap();

    let parents = ["P1", "P2", "P3", "P4", "P5"];
    graph.update(&node("M", &parents)).unwrap();
    drain(&mut graph);
    assert!(graph.column_capacity >= parents.len());
    assert_eq!(graph.lanes(), parents.len());
}

#[test]
fn test_palette_needs_two_colors() {
    let mut graph: Graph<String, NoColor> = Graph::new();
    assert_eq!(
        graph.set_palette(vec![NoColor]),
        Err(GraphError::PaletteTooSmall { len: 1 })
    );
    assert_eq!(
        graph.update(&node("A", &[])),
        Err(GraphError::PaletteTooSmall { len: 0 })
    );
}

#[test]
fn test_pre_commit_rejects_plain_merge() {
    let mut graph = plain_graph(2);
    graph.update(&node("C", &["A", "B"])).unwrap();
    graph.state = GraphState::PreCommit;

    let err = graph.next_line().unwrap_err();
    match err {
        GraphError::PreCommitParents { snapshot } => {
            assert_eq!(snapshot.commit, "\"C\"");
            assert_eq!(snapshot.num_parents, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_post_merge_reports_missing_parent_lane() {
    let mut graph = plain_graph(2);
    graph.update(&node("C", &["A", "B"])).unwrap();
    graph.next_line().unwrap();
    graph.parents[1] = "Z".to_string();

    let err = graph.next_line().unwrap_err();
    assert!(matches!(err, GraphError::ParentLaneMissing { ref parent, .. } if parent == "\"Z\""));
    assert!(err.to_string().contains("state=post-merge"));
}

#[test]
fn test_pre_commit_rejects_extra_expansion_row() {
    let history = octopus_history();
    let mut graph = plain_graph(5);
    graph.update(&history[0]).unwrap();
    drain(&mut graph);

    graph.update(&history[1]).unwrap();
    assert_eq!(graph.state(), GraphState::PreCommit);
    graph.expansion_row = 2;

    let err = graph.next_line().unwrap_err();
    match err {
        GraphError::ExpansionRowOutOfRange { snapshot } => {
            assert_eq!(snapshot.expansion_row, 2);
            assert_eq!(snapshot.num_parents, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_collapse_rejects_lane_moving_right() {
    let mut graph = plain_graph(2);
    graph.update(&node("C", &["A", "B"])).unwrap();
    graph.next_line().unwrap();

    // Cell 0 claiming lane 1 would need to move right.
    graph.state = GraphState::Collapsing;
    graph.mapping[0] = Some(1);

    let err = graph.next_line().unwrap_err();
    assert!(matches!(
        err,
        GraphError::MappingInvariant { check: "target * 2 <= i", cell: 0, .. }
    ));
    assert!(err.to_string().contains("state=collapsing"));
}
