// File: crates/chart-core/tests/selection_props.rs
// Purpose: Exhaustively check the never-empty selection rule over every non-empty starting subset.

use survey_chart_core::{SelectionSet, SelectionState};

fn universe() -> Vec<String> {
    ["Better", "Same", "Worse", "Don't know"].iter().map(|s| s.to_string()).collect()
}

#[test]
fn toggling_members_off_resets_exactly_at_the_last_one() {
    let all = universe();
    for mask in 1u32..(1 << all.len()) {
        let members = all
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, c)| c.clone())
            .collect::<Vec<_>>();
        let mut set = SelectionSet::with_selected(all.clone(), &members).expect("known categories");
        assert_eq!(set.len(), members.len());

        for (k, m) in members.iter().enumerate() {
            set = set.toggle(m).expect("known category");
            assert!(!set.is_empty(), "mask {mask:#b}: empty after removing {m}");
            let last = k + 1 == members.len();
            if last {
                assert_eq!(set.state(), SelectionState::All, "mask {mask:#b}: expected reset");
            } else {
                assert_eq!(set.len(), members.len() - k - 1);
                assert!(!set.is_selected(m));
            }
        }
    }
}

#[test]
fn adding_back_every_member_reaches_all() {
    let all = universe();
    let mut set = SelectionSet::with_selected(all.clone(), ["Same"]).unwrap();
    for c in all.iter().filter(|c| c.as_str() != "Same") {
        assert_eq!(set.state(), SelectionState::Partial);
        set = set.toggle(c).unwrap();
    }
    assert_eq!(set.state(), SelectionState::All);
    assert!(all.iter().all(|c| !set.is_muted(c)));
}
