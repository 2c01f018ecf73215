//! Property tests: coordinates stay dense under arbitrary edit sequences.

use gridbind::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    AddItem(Option<usize>),
    InsertItem { row: usize, section: usize },
    RemoveItem { section: usize, row: usize },
    ToggleItem(usize),
    AddSection(Option<usize>),
    RemoveSection(usize),
    ToggleSection(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => proptest::option::of(0usize..4).prop_map(Op::AddItem),
        3 => (0usize..8, 0usize..4).prop_map(|(row, section)| Op::InsertItem { row, section }),
        2 => (0usize..4, 0usize..8).prop_map(|(section, row)| Op::RemoveItem { section, row }),
        2 => (0usize..32).prop_map(Op::ToggleItem),
        1 => proptest::option::of(0usize..4).prop_map(Op::AddSection),
        1 => (0usize..8).prop_map(Op::RemoveSection),
        1 => (0usize..8).prop_map(Op::ToggleSection),
    ]
}

fn apply(source: &mut TableDataSource, op: &Op) {
    match *op {
        Op::AddItem(section) => {
            source.add_item(ItemModel::new("Cell"), section);
        }
        Op::InsertItem { row, section } => {
            let item = TableItem::new(ItemModel::new("Cell"));
            let _ = source.insert_item(item, Some(row), Some(section));
        }
        Op::RemoveItem { section, row } => {
            source.remove_item(Coordinate::new(section, row));
        }
        Op::ToggleItem(n) => {
            let items = source.all_items();
            if !items.is_empty() {
                let item = &items[n % items.len()];
                source.set_item_visible(item, !item.is_visible());
            }
        }
        Op::AddSection(at) => {
            let at = at.map(|at| at.min(source.sections().len()));
            source.add_section(None, None, at);
        }
        Op::RemoveSection(n) => {
            if let Some(id) = pick_section(source, n) {
                source.remove_section(id);
            }
        }
        Op::ToggleSection(n) => {
            if let Some(id) = pick_section(source, n) {
                let visible = source.section_by_id(id).is_some_and(TableSection::is_visible);
                source.set_section_visible(id, !visible);
            }
        }
    }
}

fn pick_section(source: &TableDataSource, n: usize) -> Option<SectionId> {
    let sections = source.sections();
    if sections.is_empty() {
        return None;
    }
    Some(sections[n % sections.len()].id())
}

fn assert_dense(source: &TableDataSource) -> Result<(), TestCaseError> {
    let visible: Vec<&TableSection> = source.sections().iter().filter(|s| s.is_visible()).collect();
    prop_assert_eq!(visible.len(), source.number_of_sections());

    for (section_index, section) in visible.into_iter().enumerate() {
        prop_assert_eq!(section.index(), section_index);
        for (row, item) in section.visible_items().enumerate() {
            prop_assert_eq!(item.coordinate(), Coordinate::new(section_index, row));
        }
        prop_assert_eq!(section.number_of_items(), source.number_of_items(section_index));
    }
    Ok(())
}

fn lenient() -> TableDataSource {
    TableDataSource::with_config(DataSourceConfig::new().strict_bounds(false))
}

proptest! {
    #[test]
    fn visible_coordinates_stay_dense(ops in proptest::collection::vec(op(), 1..48)) {
        let mut source = lenient();
        for op in &ops {
            apply(&mut source, op);
            assert_dense(&source)?;
        }
    }

    #[test]
    fn add_item_backfills_exactly(existing in 0usize..4, target in 0usize..8) {
        let mut source = lenient();
        for _ in 0..existing {
            source.add_section(None, None, None);
        }

        source.add_item(ItemModel::new("Cell"), Some(target));

        prop_assert_eq!(source.number_of_sections(), existing.max(target + 1));
        for section in 0..source.number_of_sections() {
            let expected = usize::from(section == target);
            prop_assert_eq!(source.number_of_items(section), expected);
        }
    }

    #[test]
    fn insert_then_item_round_trips(before in 0usize..6, row in 0usize..7, section in 0usize..3) {
        let mut source = lenient();
        for _ in 0..before {
            source.add_item(ItemModel::new("Cell"), Some(section));
        }
        prop_assume!(row <= before);

        let item = TableItem::new(ItemModel::new("Inserted"));
        source.insert_item(item.clone(), Some(row), Some(section)).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let found = source.item(Coordinate::new(section, row));
        prop_assert!(found.is_some_and(|found| found.ptr_eq(&item)));
        prop_assert_eq!(item.coordinate(), Coordinate::new(section, row));
    }

    #[test]
    fn remove_section_by_element_id_removes_one(count in 1usize..6, marked in 0usize..6) {
        let mut source = lenient();
        for i in 0..count {
            let header = ItemModel::new("Header").with_element_id(if i == marked { "marked" } else { "plain" });
            source.add_section(Some(header), None, None);
        }

        let removed = source.remove_section_by_element_id("marked");
        if marked < count {
            prop_assert!(removed.is_some());
            prop_assert_eq!(source.number_of_sections(), count - 1);
        } else {
            prop_assert!(removed.is_none());
            prop_assert_eq!(source.number_of_sections(), count);
        }
        assert_dense(&source)?;
    }
}
