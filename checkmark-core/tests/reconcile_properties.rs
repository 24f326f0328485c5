use std::collections::HashSet;

use checkmark_core::{
    OwnedItem, ProgressSummary, ReconciledItem, RequiredItem, compute_progress, format_progress,
    reconcile,
};

fn required(entries: &[(&str, &str)]) -> Vec<RequiredItem> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, (item_type, name))| {
            RequiredItem::new(idx as u64 + 1, *item_type, *name, format!("{item_type}.png"))
        })
        .collect()
}

fn names(items: &[ReconciledItem]) -> Vec<&str> {
    items.iter().map(|item| item.name.as_str()).collect()
}

#[test]
fn alpha_beta_zulu_scenario() {
    let required = required(&[("a", "Alpha"), ("b", "Beta")]);
    let owned = vec![
        OwnedItem::new("a", 2).with_name("Alpha"),
        OwnedItem::new("z", 1).with_name("Zulu"),
    ];

    let items = reconcile(&required, &owned);
    let summary: Vec<_> = items
        .iter()
        .map(|item| (item.name.as_str(), item.quantity, item.le))
        .collect();
    assert_eq!(
        summary,
        [("Alpha", 2, false), ("Beta", 0, false), ("Zulu", 1, true)]
    );

    let progress = compute_progress(&items, &required);
    assert_eq!(
        progress,
        ProgressSummary {
            checkmark: false,
            completed: 1,
            required: 2,
            le: 1,
        }
    );
    assert_eq!(format_progress(&progress), "1 of 2 (+1 LE)");
}

#[test]
fn empty_owned_keeps_every_required_item_at_zero() {
    let required = required(&[("c", "Charlie"), ("a", "Alpha"), ("b", "Bravo")]);
    let items = reconcile(&required, &[]);
    assert_eq!(items.len(), required.len());
    assert!(items.iter().all(|item| item.quantity == 0 && !item.le));

    let progress = compute_progress(&items, &required);
    assert_eq!(progress.completed, 0);
    assert!(!progress.checkmark);
}

#[test]
fn one_entry_per_distinct_type() {
    let required = required(&[("a", "Alpha"), ("b", "Bravo"), ("c", "Charlie")]);
    let owned = vec![
        OwnedItem::new("b", 1),
        OwnedItem::new("x", 3).with_name("X-Ray"),
        OwnedItem::new("b", 4),
        OwnedItem::new("y", 1).with_name("Yankee"),
        OwnedItem::new("x", 9).with_name("X-Ray Again"),
    ];

    let items = reconcile(&required, &owned);
    let types: Vec<_> = items.iter().map(|item| item.item_type.as_str()).collect();
    let distinct: HashSet<_> = types.iter().copied().collect();
    assert_eq!(types.len(), distinct.len());
    assert_eq!(distinct.len(), 5);

    for item in &items {
        let in_checklist = required.iter().any(|r| r.item_type == item.item_type);
        assert_eq!(item.le, !in_checklist, "le flag wrong for {}", item.item_type);
    }
}

#[test]
fn output_is_sorted_and_independent_of_input_order() {
    let forward = required(&[("d", "Delta"), ("a", "Alpha"), ("c", "Charlie"), ("b", "Bravo")]);
    let mut backward = forward.clone();
    backward.reverse();

    let owned = vec![OwnedItem::new("c", 1), OwnedItem::new("e", 2).with_name("Echo")];
    let mut owned_reversed = owned.clone();
    owned_reversed.reverse();

    let first = reconcile(&forward, &owned);
    let second = reconcile(&backward, &owned_reversed);

    assert!(names(&first).windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(first, second);
}

#[test]
fn equal_names_keep_input_order() {
    let required = vec![
        RequiredItem::new(1u64, "first", "Same", "1.png"),
        RequiredItem::new(2u64, "second", "Same", "2.png"),
    ];
    let items = reconcile(&required, &[]);
    let types: Vec<_> = items.iter().map(|item| item.item_type.as_str()).collect();
    assert_eq!(types, ["first", "second"]);
}

#[test]
fn checkmark_iff_every_required_type_owned() {
    let required = required(&[("a", "Alpha"), ("b", "Bravo")]);

    let partial = reconcile(&required, &[OwnedItem::new("a", 1), OwnedItem::new("z", 5)]);
    assert!(!compute_progress(&partial, &required).checkmark);

    let zero_owned = reconcile(&required, &[OwnedItem::new("a", 1), OwnedItem::new("b", 0)]);
    assert!(!compute_progress(&zero_owned, &required).checkmark);

    let full = reconcile(&required, &[OwnedItem::new("b", 1), OwnedItem::new("a", 1)]);
    let progress = compute_progress(&full, &required);
    assert!(progress.checkmark);
    assert_eq!(format_progress(&progress), "2 of 2");
}

#[test]
fn formatter_outputs() {
    let summary = ProgressSummary {
        checkmark: false,
        completed: 3,
        required: 5,
        le: 0,
    };
    assert_eq!(format_progress(&summary), "3 of 5");
    assert_eq!(
        format_progress(&ProgressSummary { le: 2, ..summary }),
        "3 of 5 (+2 LE)"
    );
}

#[test]
fn owned_record_without_type_counts_as_limited_edition() {
    let required = required(&[("a", "Alpha"), ("b", "Beta")]);
    let owned: Vec<OwnedItem> = serde_json::from_str(
        r#"[{ "name": "Mystery", "quantity": 1, "quantity_formatted": "1" }]"#,
    )
    .expect("owned records parse");

    let items = reconcile(&required, &owned);
    assert_eq!(names(&items), ["Alpha", "Beta", "Mystery"]);
    assert!(items[2].le);

    let progress = compute_progress(&items, &required);
    assert_eq!(format_progress(&progress), "0 of 2 (+1 LE)");
}
