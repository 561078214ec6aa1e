mod common;

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    use test_case::test_case;

    use bleu::bounds::lp::{CoveringLp, DenseSimplex, LowerBoundUnavailable, LpSolution, LpSolver};
    use bleu::entities::{Coord, Instance, InvalidInstance};
    use bleu::io::ext_repr::ExtInstance;
    use bleu::search::{Exactness, Outcome};
    use bleu::solver::{Bleu, HeightSearchStatus, decide_feasibility, prefers_transposed};
    use bleu::util::{BleuConfig, BoundsConfig, BudgetConfig};

    use crate::common::{brute_force_feasible, brute_force_optimum, init_logger, random_instances};

    fn exhaustive_config() -> BleuConfig {
        BleuConfig {
            budgets: BudgetConfig::unlimited(),
            ..BleuConfig::default()
        }
    }

    fn read_instance(path: &str) -> Instance {
        let file = File::open(Path::new(path)).unwrap();
        let ext_instance: ExtInstance = serde_json::from_reader(BufReader::new(file)).unwrap();
        bleu::io::import(&ext_instance).unwrap()
    }

    #[test_case("../assets/three_items.json", 8; "three_items")]
    #[test_case("../assets/four_squares.json", 4; "four_squares")]
    #[test_case("../assets/mixed.json", 5; "mixed")]
    fn test_minimum_height(instance_path: &str, expected: usize) {
        init_logger();
        let instance = read_instance(instance_path);
        let solver = Bleu::new(instance.clone(), exhaustive_config());
        let report = solver.minimize();

        assert_eq!(report.status, HeightSearchStatus::Optimal);
        let (height, packing) = report.solution.unwrap();
        assert_eq!(height, expected);
        assert!(packing.is_valid(&instance, height));
        assert!(solver.lower_bound() <= expected);
    }

    #[test]
    fn three_items_packing() {
        init_logger();
        let instance = Instance::from_dims(5, [(4, 3), (3, 2), (2, 5)]).unwrap();
        let config = BleuConfig {
            bounds: BoundsConfig::combinatorial(),
            ..exhaustive_config()
        };
        let solver = Bleu::new(instance.clone(), config);
        assert_eq!(solver.lower_bound(), 7);

        let evaluation = solver.evaluate(7);
        assert!(evaluation.decision.is_infeasible());
        assert_eq!(evaluation.exactness, Exactness::Exact);

        let packing = solver.evaluate(8).decision.feasible().unwrap();
        assert!(packing.is_valid(&instance, 8));
        assert_eq!(packing.position(0), Coord::new(0, 0));
        assert_eq!(packing.position(1), Coord::new(0, 3));
        assert_eq!(packing.position(2), Coord::new(3, 3));
    }

    #[test]
    fn exhausted_budget_is_pending() {
        init_logger();
        let dims = [(1, 3), (3, 3), (2, 2), (2, 3)];
        let instance = Instance::from_dims(5, dims).unwrap();
        let config = |budgets| BleuConfig {
            budgets,
            bounds: BoundsConfig::combinatorial(),
            ..BleuConfig::default()
        };

        let starved = Bleu::new(instance.clone(), config(BudgetConfig::uniform(1)));
        assert!(starved.lower_bound() <= 5);
        assert!(starved.evaluate(5).decision.is_pending());

        let exhaustive = Bleu::new(instance.clone(), config(BudgetConfig::unlimited()));
        let evaluation = exhaustive.evaluate(5);
        assert!(evaluation.decision.is_infeasible());
        assert_eq!(evaluation.exactness, Exactness::Exact);
        assert!(exhaustive.evaluate(6).decision.is_feasible());
    }

    #[test]
    fn infeasible_below_tallest_item() {
        let evaluation = decide_feasibility(4, &[(1, 5), (1, 1)], 4, BleuConfig::default()).unwrap();
        assert_eq!(evaluation.decision, Outcome::Infeasible);
    }

    #[test]
    fn single_item() {
        let evaluation = decide_feasibility(4, &[(3, 2)], 2, BleuConfig::default()).unwrap();
        let packing = evaluation.decision.feasible().unwrap();
        assert_eq!(packing.position(0), Coord::new(0, 0));
    }

    #[test_case(0, &[(1, 1)], InvalidInstance::ZeroStripWidth; "zero width")]
    #[test_case(3, &[], InvalidInstance::NoItems; "no items")]
    #[test_case(3, &[(1, 1), (0, 2)], InvalidInstance::DegenerateItem { id: 1 }; "degenerate item")]
    #[test_case(3, &[(4, 1)], InvalidInstance::ItemTooWide { id: 0, width: 4, strip_width: 3 }; "item too wide")]
    fn malformed_instance(strip_width: usize, dims: &[(usize, usize)], expected: InvalidInstance) {
        let result = decide_feasibility(strip_width, dims, 10, BleuConfig::default());
        assert_eq!(result.err(), Some(expected));
    }

    #[test_case(1; "seed 1")]
    #[test_case(2; "seed 2")]
    #[test_case(3; "seed 3")]
    fn decisions_match_brute_force(seed: u64) {
        init_logger();
        for instance in random_instances(seed, 60, 5, 7) {
            let solver = Bleu::new(instance.clone(), exhaustive_config());
            let optimum = brute_force_optimum(&instance);
            assert!(
                solver.lower_bound() <= optimum,
                "lower bound {} exceeds optimum {optimum} for {instance:?}",
                solver.lower_bound()
            );
            for height in instance.max_height()..=optimum + 1 {
                let evaluation = solver.evaluate(height);
                assert_eq!(evaluation.exactness, Exactness::Exact);
                match evaluation.decision {
                    Outcome::Feasible(packing) => {
                        assert!(height >= optimum, "{instance:?} packed below its optimum");
                        assert!(packing.is_valid(&instance, height));
                    }
                    Outcome::Infeasible => {
                        assert!(height < optimum, "{instance:?} rejected at height {height}")
                    }
                    Outcome::Pending => panic!("unlimited budget left {instance:?} pending"),
                }
            }
        }
    }

    #[test_case(4; "seed 4")]
    #[test_case(5; "seed 5")]
    fn minimum_height_matches_brute_force(seed: u64) {
        for instance in random_instances(seed, 40, 6, 6) {
            let report = Bleu::new(instance.clone(), exhaustive_config()).minimize();
            let (height, packing) = report.solution.unwrap();
            assert_eq!(height, brute_force_optimum(&instance), "{instance:?}");
            assert!(packing.is_valid(&instance, height));
            assert_eq!(report.lower_bound, height);
        }
    }

    #[test]
    fn combinatorial_bounds_only() {
        for instance in random_instances(6, 40, 5, 6) {
            let config = BleuConfig {
                bounds: BoundsConfig::combinatorial(),
                ..exhaustive_config()
            };
            let report = Bleu::with_lp_solver(instance.clone(), config, None).minimize();
            assert_eq!(report.solution.unwrap().0, brute_force_optimum(&instance));
        }
    }

    #[test]
    fn feasibility_is_monotone_in_height() {
        for instance in random_instances(7, 40, 5, 6) {
            let solver = Bleu::new(instance.clone(), exhaustive_config());
            let decisions = (1..=instance.total_height())
                .map(|h| solver.evaluate(h).decision.is_feasible())
                .collect::<Vec<_>>();
            assert!(
                decisions.windows(2).all(|w| !w[0] || w[1]),
                "{instance:?}: {decisions:?}"
            );
            assert_eq!(decisions.last(), Some(&true));
        }
    }

    #[test]
    fn relaxation_never_rejects_a_feasible_height() {
        for instance in random_instances(8, 60, 5, 6) {
            let solver = Bleu::new(instance.clone(), exhaustive_config());
            for height in instance.max_height()..=instance.total_height() {
                let relaxed = solver.evaluate_relaxed(height);
                if brute_force_feasible(&instance, height) {
                    assert!(relaxed.is_feasible(), "{instance:?} at height {height}");
                }
                if relaxed.is_infeasible() {
                    assert!(solver.evaluate(height).decision.is_infeasible());
                }
            }
        }
    }

    #[test]
    fn transposed_decisions_agree() {
        for instance in random_instances(9, 40, 5, 6) {
            let direct = Bleu::new(instance.clone(), exhaustive_config());
            let transposing = Bleu::new(
                instance.clone(),
                BleuConfig {
                    transpose: true,
                    ..exhaustive_config()
                },
            );
            for height in instance.max_height()..=instance.total_height() {
                let a = direct.evaluate(height).decision;
                let b = transposing.evaluate(height).decision;
                assert_eq!(a.is_feasible(), b.is_feasible(), "{instance:?} at height {height}");
                if let Outcome::Feasible(packing) = b {
                    assert!(packing.is_valid(&instance, height));
                }
            }
        }
    }

    #[derive(Default)]
    struct CountingSolver {
        inner: DenseSimplex,
        n_solves: Cell<usize>,
    }

    impl LpSolver for CountingSolver {
        fn solve(&self, lp: &CoveringLp) -> Result<LpSolution, LowerBoundUnavailable> {
            self.n_solves.set(self.n_solves.get() + 1);
            self.inner.solve(lp)
        }
    }

    #[test]
    fn transposed_decisions_skip_lp_bounds() {
        let instance = Instance::from_dims(12, [(5, 1), (4, 1), (3, 1)]).unwrap();
        assert!(prefers_transposed(&instance, 1));

        let solver = CountingSolver::default();
        let config = BleuConfig {
            transpose: true,
            ..exhaustive_config()
        };
        let bleu = Bleu::with_lp_solver(instance.clone(), config, Some(&solver));
        let n_solves = solver.n_solves.get();

        for height in 1..=instance.total_height() {
            let evaluation = bleu.evaluate(height);
            assert!(evaluation.decision.is_feasible(), "height {height}");
        }
        let Outcome::Feasible(packing) = bleu.evaluate(1).decision else {
            panic!("height 1 should be feasible");
        };
        assert!(packing.is_valid(&instance, 1));
        assert_eq!(solver.n_solves.get(), n_solves);
    }

    #[test]
    fn zero_time_limit_stops_immediately() {
        let instance = Instance::from_dims(5, [(4, 3), (3, 2), (2, 5)]).unwrap();
        let config = BleuConfig {
            time_limit_s: Some(0),
            ..BleuConfig::default()
        };
        let report = Bleu::new(instance, config).minimize();
        assert_eq!(report.status, HeightSearchStatus::TimeLimit);
        assert_eq!(report.n_evaluations, 0);
        assert!(report.solution.is_none());
    }
}
