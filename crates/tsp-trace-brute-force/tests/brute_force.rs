use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tsp_trace_brute_force::solve;
use tsp_trace_core::{City, DistanceMatrix};

#[test]
fn trivial_inputs() {
    assert_eq!(solve(&DistanceMatrix::from_cities(&[])), None);

    let one = solve(&DistanceMatrix::from_cities(&[City::labelled(0, 1.0, 1.0)])).unwrap();
    assert_eq!(one.path, vec![0, 0]);
    assert_eq!(one.cost, 0.0);

    let two = solve(&DistanceMatrix::from_cities(&[City::labelled(0, 0.0, 0.0), City::labelled(1, 3.0, 4.0)])).unwrap();
    assert_eq!(two.path, vec![0, 1, 0]);
    assert_eq!(two.cost, 10.0);
}

#[test]
fn unit_square_perimeter() {
    let cities = vec![
        City::labelled(0, 0.0, 0.0),
        City::labelled(1, 1.0, 1.0),
        City::labelled(2, 1.0, 0.0),
        City::labelled(3, 0.0, 1.0),
    ];
    let tour = solve(&DistanceMatrix::from_cities(&cities)).unwrap();
    assert!((tour.cost - 4.0).abs() < 1e-12);
    assert_eq!(tour.path, vec![0, 2, 1, 3, 0]);
}

#[test]
fn tours_are_permutations_with_matching_cost() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
    for n in 2..=7 {
        let cities: Vec<City> = (0..n)
            .map(|i| City::labelled(i, rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0)))
            .collect();
        let dist = DistanceMatrix::from_cities(&cities);
        let tour = solve(&dist).unwrap();

        assert_eq!(tour.path.len(), n + 1);
        assert_eq!(tour.path[0], 0);
        assert_eq!(tour.path[n], 0);
        let mut inner = tour.path[..n].to_vec();
        inner.sort_unstable();
        assert_eq!(inner, (0..n).collect::<Vec<_>>());
        assert!((dist.path_cost(&tour.path) - tour.cost).abs() < 1e-9);
    }
}
