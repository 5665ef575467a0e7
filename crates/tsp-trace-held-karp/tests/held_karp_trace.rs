use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tsp_trace_core::{City, DistanceMatrix, SolverConfig, StepKind, SubsetMask};
use tsp_trace_held_karp::{generate_steps, generate_steps_with_config};

fn random_cities(rng: &mut Xoshiro256PlusPlus, n: usize) -> Vec<City> {
    (0..n)
        .map(|i| City::labelled(i, rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0)))
        .collect()
}

fn subset_size(key: &str) -> usize {
    key.trim_start_matches('{').trim_end_matches('}').split(',').count()
}

#[test]
fn empty_input_gives_empty_trace() {
    assert!(generate_steps(&[]).is_empty());
}

#[test]
fn single_city_is_one_done_step() {
    let trace = generate_steps(&[City::labelled(0, 5.0, 5.0)]);
    assert_eq!(trace.len(), 1);
    assert_eq!(trace[0].kind, StepKind::Done);
    assert_eq!(trace.final_cost(), Some(0.0));
    assert_eq!(trace.final_path(), Some(&[0, 0][..]));
}

#[test]
fn thirteen_cities_are_refused() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(13);
    let trace = generate_steps(&random_cities(&mut rng, 13));
    assert_eq!(trace.len(), 1);
    let step = &trace[0];
    assert_eq!(step.kind, StepKind::Done);
    assert!(step.description.contains("13 cities"), "{}", step.description);
    assert!(step.description.contains("12 or fewer"));
    assert!(step.dp_table.is_none());
    assert!(step.final_cost.is_none());
    assert!(step.final_path.is_none());
}

#[test]
fn size_guard_follows_config() {
    let cities = City::sample_five();
    let tight = SolverConfig::default().with_held_karp_max_cities(4);
    let refused = generate_steps_with_config(&cities, &tight);
    assert_eq!(refused.len(), 1);
    assert!(refused[0].description.contains("4 or fewer"));

    let loose = SolverConfig::default().with_held_karp_max_cities(5);
    assert!(generate_steps_with_config(&cities, &loose).final_cost().is_some());
}

#[test]
fn four_city_sample_finds_optimal_tour() {
    let cities = City::sample_four();
    let trace = generate_steps(&cities);

    // START, 3 base, 12 size-3, 9 size-4, 3 FINAL, DONE
    assert_eq!(trace.len(), 29);
    assert_eq!(trace[0].kind, StepKind::Start);
    assert!(trace[0].dp_table.as_ref().is_some_and(|t| t.is_empty()));

    let done = trace.last().unwrap();
    assert_eq!(done.kind, StepKind::Done);
    let path = done.final_path.clone().unwrap();
    let cost = done.final_cost.unwrap();

    assert_eq!(path.len(), 5);
    assert_eq!(path.first(), Some(&0));
    assert_eq!(path.last(), Some(&0));
    let mut visited = path[..4].to_vec();
    visited.sort_unstable();
    assert_eq!(visited, vec![0, 1, 2, 3]);
    assert!(path == vec![0, 1, 2, 3, 0] || path == vec![0, 3, 2, 1, 0], "{path:?}");

    let matrix = done.distance_matrix.as_ref().unwrap();
    assert!((matrix.path_cost(&path) - cost).abs() < 1e-9);
    assert!((cost - 794.03).abs() < 0.01, "{cost}");
}

#[test]
fn matches_brute_force_on_random_instances() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5eed);
    for n in 2..=8 {
        for _ in 0..4 {
            let cities = random_cities(&mut rng, n);
            let trace = generate_steps(&cities);
            let oracle = tsp_trace_brute_force::solve(&DistanceMatrix::from_cities(&cities)).unwrap();
            let cost = trace.final_cost().unwrap();
            assert!((cost - oracle.cost).abs() < 1e-6, "n={n}: {cost} vs {}", oracle.cost);
        }
    }
}

#[test]
fn matches_brute_force_on_larger_instances() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x10_11);
    for n in [10, 11] {
        let cities = random_cities(&mut rng, n);
        let trace = generate_steps(&cities);
        let oracle = tsp_trace_brute_force::solve(&DistanceMatrix::from_cities(&cities)).unwrap();
        let cost = trace.final_cost().unwrap();
        assert!((cost - oracle.cost).abs() < 1e-6, "n={n}: {cost} vs {}", oracle.cost);
    }
}

#[test]
fn twelve_cities_run_to_completion() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(12);
    let cities = random_cities(&mut rng, 12);
    let trace = generate_steps(&cities);

    // START, 11 base, sum over sizes s of C(11, s-1) * (s-1)^2, 11 FINAL, DONE
    assert_eq!(trace.len(), 67_597);
    let done = trace.last().unwrap();
    assert_eq!(done.kind, StepKind::Done);
    assert_eq!(done.dp_table.as_ref().map(|t| t.len()), Some(11 * (1 << 10)));

    let path = trace.final_path().unwrap();
    assert_eq!(path.len(), 13);
    let mut inner = path[..12].to_vec();
    inner.sort_unstable();
    assert_eq!(inner, (0..12).collect::<Vec<_>>());
    let matrix = done.distance_matrix.as_ref().unwrap();
    assert!((matrix.path_cost(path) - trace.final_cost().unwrap()).abs() < 1e-9);
}

#[test]
fn runs_are_deterministic() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
    let cities = random_cities(&mut rng, 6);
    let a = generate_steps(&cities);
    let b = generate_steps(&cities);
    assert_eq!(a, b);
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
}

#[test]
fn dp_entries_are_never_overwritten() {
    let trace = generate_steps(&City::sample_five());
    let tables: Vec<_> = trace.iter().filter_map(|s| s.dp_table.as_ref()).collect();
    assert_eq!(tables.len(), trace.len());

    for pair in tables.windows(2) {
        let (before, after) = (pair[0], pair[1]);
        assert!(before.len() <= after.len());
        for record in before.records() {
            assert_eq!(after.get(record.mask, record.end), Some(&record.entry));
        }
    }

    let last = tables.last().unwrap();
    let mut keys: Vec<_> = last.records().iter().map(|r| (r.mask, r.end)).collect();
    let total = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), total);
    // every (mask containing start, end != start) with |mask| >= 2
    assert_eq!(total, 4 * (1 << 3));
}

#[test]
fn subsets_are_recorded_in_size_order() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(99);
    let cities = random_cities(&mut rng, 7);
    let trace = generate_steps(&cities);

    let sizes: Vec<usize> = trace
        .iter()
        .filter_map(|s| s.highlighted_cell.as_ref())
        .map(|cell| subset_size(&cell.subset_key))
        .collect();
    assert!(!sizes.is_empty());
    assert!(sizes.windows(2).all(|w| w[0] <= w[1]), "{sizes:?}");
    assert_eq!(sizes.first(), Some(&2));
    assert_eq!(sizes.last(), Some(&7));
}

#[test]
fn candidate_paths_extend_stored_predecessors() {
    let trace = generate_steps(&City::sample_five());
    for step in trace.iter().filter(|s| s.kind == StepKind::Subproblem) {
        let path = step.path_being_calculated.as_ref().unwrap();
        let cell = step.highlighted_cell.as_ref().unwrap();
        assert_eq!(path.first(), Some(&0));
        assert_eq!(path.last(), Some(&cell.end_node));
        assert_eq!(path.len(), subset_size(&cell.subset_key));
    }
}

#[test]
fn equal_costs_keep_the_lowest_predecessor() {
    // Square: both directions around it cost the same.
    let cities = vec![
        City::labelled(0, 0.0, 0.0),
        City::labelled(1, 10.0, 0.0),
        City::labelled(2, 10.0, 10.0),
        City::labelled(3, 0.0, 10.0),
    ];
    let trace = generate_steps(&cities);
    let table = trace.last().unwrap().dp_table.as_ref().unwrap();
    let full = SubsetMask::full(4);

    // DP[full][2] can arrive from 1 (0-3-1-2) or 3 (0-1-3-2); same cost, k=1 wins.
    let entry = table.get(full, 2).unwrap();
    assert_eq!(entry.path, vec![0, 3, 1, 2]);
    // Closing through 1 and through 3 both give 40; the first one wins.
    assert_eq!(trace.final_path(), Some(&[0, 3, 2, 1, 0][..]));
    assert!((trace.final_cost().unwrap() - 40.0).abs() < 1e-9);
}

#[test]
fn serialized_steps_follow_the_viewer_schema() {
    let trace = generate_steps(&City::sample_four());
    let json = serde_json::to_value(&trace).unwrap();
    let steps = json.as_array().unwrap();

    assert_eq!(steps[0]["type"], "START");
    assert_eq!(steps[0]["dpTable"], serde_json::json!({}));
    assert_eq!(steps[0]["distanceMatrix"].as_array().unwrap().len(), 4);
    assert!(steps[0].get("finalPath").is_none());

    let base = &steps[1];
    assert_eq!(base["type"], "SUBPROBLEM");
    assert_eq!(base["description"], "Base case (size 2): Cost from A to B is 206.16.");
    assert_eq!(base["highlightedCell"], serde_json::json!({ "subsetKey": "{A,B}", "endNode": 1 }));
    assert_eq!(base["pathBeingCalculated"], serde_json::json!([0, 1]));
    assert_eq!(base["dpTable"]["{A,B}"]["1"]["path"], serde_json::json!([0, 1]));

    let done = steps.last().unwrap();
    assert_eq!(done["type"], "DONE");
    assert!(done["finalCost"].is_f64());
    assert!(done["description"].as_str().unwrap().starts_with("Optimal tour found! Total cost: 794.03."));
    assert!(steps.iter().filter(|s| s["type"] == "FINAL").count() == 3);
}

#[test]
fn serialized_dp_table_lists_subsets_in_mask_order() {
    let trace = generate_steps(&City::sample_four());
    let json = serde_json::to_value(&trace).unwrap();
    let table = json.as_array().unwrap().last().unwrap()["dpTable"].as_object().unwrap();
    let keys: Vec<&str> = table.keys().map(String::as_str).collect();
    assert_eq!(keys, ["{A,B}", "{A,C}", "{A,B,C}", "{A,D}", "{A,B,D}", "{A,C,D}", "{A,B,C,D}"]);
    assert_eq!(table["{A,B,C,D}"].as_object().unwrap().keys().collect::<Vec<_>>(), ["1", "2", "3"]);
}
