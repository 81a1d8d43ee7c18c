use instance_hierarchy::{
    InstanceBatch, InstanceHierarchy, InstanceId, InstancePath, InstancePathError, InstanceRecord,
    ObjectId, MAX_NESTING_DEPTH,
};
use maplit::hashmap;

fn path(indices: &[i32]) -> InstancePath {
    InstancePath::from_indices(indices).unwrap()
}

fn record(indices: &[i32], instance: u64, source: u64) -> InstanceRecord {
    InstanceRecord::new(path(indices), InstanceId::new(instance), ObjectId::new(source))
}

fn hierarchy_of(records: &[InstanceRecord]) -> InstanceHierarchy {
    let mut batch = InstanceBatch::new();
    for entry in records {
        batch.register(*entry).unwrap();
    }
    batch.finish()
}

fn permutations(records: &[InstanceRecord]) -> Vec<Vec<InstanceRecord>> {
    if records.len() <= 1 {
        return vec![records.to_vec()];
    }

    let mut all = Vec::new();
    for index in 0..records.len() {
        let mut rest = records.to_vec();
        let chosen = rest.remove(index);

        for mut tail in permutations(&rest) {
            tail.insert(0, chosen);
            all.push(tail);
        }
    }
    all
}

#[test]
fn instance_of_an_instance_parents_to_the_inner_instance() {
    let _ = env_logger::try_init();

    // One real object, instanced directly and then instanced again inside
    // that instance. The inner copy must hang off the outer one, not off the
    // real object.
    let real_object = ObjectId::new(10);
    let outer = record(&[0], 1, 10);
    let inner = record(&[2, 0], 2, 10);

    let hierarchy = hierarchy_of(&[outer, inner]);

    assert!(hierarchy.is_duplicated(real_object));
    assert_eq!(
        hierarchy.find_suitable_export_parent(&path(&[2, 0])),
        Some(&outer)
    );
}

#[test]
fn single_level_instances_have_no_export_parent() {
    let _ = env_logger::try_init();

    let lone = record(&[4], 1, 10);
    let hierarchy = hierarchy_of(&[lone]);

    assert_eq!(path(&[4]).instancer_path(), InstancePath::EMPTY);
    assert_eq!(hierarchy.find_suitable_export_parent(&path(&[4])), None);
}

#[test]
fn registration_order_never_changes_resolution() {
    let _ = env_logger::try_init();

    // A scene exercising every resolution outcome at once: no parent,
    // duplicated parent, instancer stand-in, and the sibling tier for a
    // vacant parent position.
    let records = [
        record(&[0], 1, 100),
        record(&[2, 0], 2, 100),
        record(&[1], 3, 200),
        record(&[0, 1], 4, 300),
        record(&[3], 5, 100),
        record(&[1, 7], 6, 200),
    ];

    let expected_parents = hashmap! {
        path(&[0]) => None,
        path(&[2, 0]) => Some(InstanceId::new(1)),
        path(&[1]) => None,
        path(&[0, 1]) => Some(InstanceId::new(3)),
        path(&[3]) => None,
        path(&[1, 7]) => Some(InstanceId::new(3)),
    };

    for ordering in permutations(&records) {
        let hierarchy = hierarchy_of(&ordering);

        for (query, expected) in &expected_parents {
            assert_eq!(
                hierarchy
                    .find_suitable_export_parent(query)
                    .map(|parent| parent.instance),
                *expected,
                "parent of {:?} changed under registration order {:?}",
                query,
                ordering
            );
        }

        assert!(hierarchy.is_duplicated(ObjectId::new(100)));
        assert!(hierarchy.is_duplicated(ObjectId::new(200)));
        assert!(hierarchy.is_duplicated(ObjectId::new(300)));
        assert!(!hierarchy.is_duplicated(ObjectId::new(999)));
    }
}

#[test]
fn vacant_parent_positions_resolve_through_a_sibling_copy() {
    let _ = env_logger::try_init();

    // Nothing was registered at [7], the parent position of [1, 7]. The
    // batch still contains another direct instance of the same object, so
    // the chain is preserved through it.
    let sibling = record(&[1], 1, 200);
    let nested = record(&[1, 7], 2, 200);

    let hierarchy = hierarchy_of(&[sibling, nested]);

    assert_eq!(
        hierarchy.find_suitable_export_parent(&path(&[1, 7])),
        Some(&sibling)
    );
}

#[test]
fn nesting_runs_to_capacity_and_no_further() {
    let _ = env_logger::try_init();

    // A chain of instances-of-instances all the way down to the depth
    // limit. Every link resolves to the record one level out.
    let mut records = Vec::new();
    for depth in 1..=MAX_NESTING_DEPTH {
        records.push(record(&vec![0; depth], depth as u64, 10));
    }
    let hierarchy = hierarchy_of(&records);

    for depth in 2..=MAX_NESTING_DEPTH {
        let parent = hierarchy
            .find_suitable_export_parent(&path(&vec![0; depth]))
            .map(|parent| parent.instance);
        assert_eq!(parent, Some(InstanceId::new(depth as u64 - 1)));
    }
    assert_eq!(hierarchy.find_suitable_export_parent(&path(&[0])), None);

    // One level past capacity is rejected outright rather than truncated.
    assert_eq!(
        InstancePath::from_indices(&vec![0; MAX_NESTING_DEPTH + 1]),
        Err(InstancePathError::TooDeep {
            depth: MAX_NESTING_DEPTH + 1
        })
    );
}

#[test]
fn name_suffixes_disambiguate_instances_of_one_object() {
    let _ = env_logger::try_init();

    let records = [
        record(&[0], 1, 10),
        record(&[1], 2, 10),
        record(&[2, 0], 3, 10),
    ];

    let mut names: Vec<String> = records
        .iter()
        .map(|entry| format!("Cube-{}", entry.path.as_object_name_suffix()))
        .collect();

    assert_eq!(names, vec!["Cube-0", "Cube-1", "Cube-0-2"]);

    names.sort();
    names.dedup();
    assert_eq!(names.len(), records.len());
}
