//! Chooser/cutter configuration, ported from `flow_cutter_config.h`'s
//! `Config` struct. Every enum field round-trips through `get`/`set` on its
//! canonical string form; unknown keys or values
//! fail with [`Error::ConfigError`] rather than throwing.

use crate::error::{Error, Result};

macro_rules! string_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }

            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $($text => Some(Self::$variant)),+,
                    _ => None,
                }
            }

            const VALID: &'static str = concat!($($text, ", "),+);
        }
    };
}

string_enum!(SeparatorSelection {
    NodeMinExpansion => "node_min_expansion",
    EdgeMinExpansion => "edge_min_expansion",
    NodeFirst => "node_first",
    EdgeFirst => "edge_first",
});

string_enum!(AvoidAugmentingPath {
    AvoidAndPickBest => "avoid_and_pick_best",
    DoNotAvoid => "do_not_avoid",
    AvoidAndPickOldest => "avoid_and_pick_oldest",
    AvoidAndPickRandom => "avoid_and_pick_random",
});

string_enum!(SkipNonMaximumSides {
    Skip => "skip",
    NoSkip => "no_skip",
});

string_enum!(GraphSearchAlgorithm {
    PseudoDepthFirstSearch => "pseudo_depth_first_search",
    BreadthFirstSearch => "breadth_first_search",
    DepthFirstSearch => "depth_first_search",
});

string_enum!(DumpState {
    No => "no",
    Yes => "yes",
});

string_enum!(ReportCuts {
    Yes => "yes",
    No => "no",
});

string_enum!(PierceRating {
    MaxTargetMinusSourceHopDist => "max_target_minus_source_hop_dist",
    MinSourceHopDist => "min_source_hop_dist",
    MaxTargetHopDist => "max_target_hop_dist",
    MaxTargetMinusSourceWeightDist => "max_target_minus_source_weight_dist",
    MinSourceWeightDist => "min_source_weight_dist",
    MaxTargetWeightDist => "max_target_weight_dist",
    Random => "random",
    Oldest => "oldest",
    MaxArcWeight => "max_arc_weight",
    MinArcWeight => "min_arc_weight",
    CircularHop => "circular_hop",
    CircularWeight => "circular_weight",
});

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub cutter_count: i32,
    pub random_seed: i32,
    pub source: i32,
    pub target: i32,
    pub max_cut_size: i32,
    pub max_imbalance: f32,
    pub branch_factor: i32,
    pub separator_selection: SeparatorSelection,
    pub avoid_augmenting_path: AvoidAugmentingPath,
    pub skip_non_maximum_sides: SkipNonMaximumSides,
    pub graph_search_algorithm: GraphSearchAlgorithm,
    pub dump_state: DumpState,
    pub report_cuts: ReportCuts,
    pub pierce_rating: PierceRating,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cutter_count: 3,
            random_seed: 5489,
            source: -1,
            target: -1,
            max_cut_size: 1000,
            max_imbalance: 0.2,
            branch_factor: 5,
            separator_selection: SeparatorSelection::NodeMinExpansion,
            avoid_augmenting_path: AvoidAugmentingPath::AvoidAndPickBest,
            skip_non_maximum_sides: SkipNonMaximumSides::Skip,
            graph_search_algorithm: GraphSearchAlgorithm::PseudoDepthFirstSearch,
            dump_state: DumpState::No,
            report_cuts: ReportCuts::Yes,
            pierce_rating: PierceRating::MaxTargetMinusSourceHopDist,
        }
    }
}

impl Config {
    /// Set `var` (either `CamelCase` or `snake_case` form, matching the
    /// source) to `val`'s canonical string form.
    pub fn set(&mut self, var: &str, val: &str) -> Result<()> {
        macro_rules! set_enum {
            ($field:ident, $ty:ty) => {{
                self.$field = <$ty>::parse(val).ok_or_else(|| Error::config(format!("unknown value {val:?} for {var}; valid are {}", <$ty>::VALID)))?;
                Ok(())
            }};
        }
        match var {
            "SeparatorSelection" | "separator_selection" => set_enum!(separator_selection, SeparatorSelection),
            "AvoidAugmentingPath" | "avoid_augmenting_path" => set_enum!(avoid_augmenting_path, AvoidAugmentingPath),
            "SkipNonMaximumSides" | "skip_non_maximum_sides" => set_enum!(skip_non_maximum_sides, SkipNonMaximumSides),
            "GraphSearchAlgorithm" | "graph_search_algorithm" => set_enum!(graph_search_algorithm, GraphSearchAlgorithm),
            "DumpState" | "dump_state" => set_enum!(dump_state, DumpState),
            "ReportCuts" | "report_cuts" => set_enum!(report_cuts, ReportCuts),
            "PierceRating" | "pierce_rating" => set_enum!(pierce_rating, PierceRating),
            "cutter_count" => {
                let x: i32 = parse_int(val, var)?;
                if x <= 0 {
                    return Err(Error::config(format!("value for \"cutter_count\" must satisfy x>0, got {x}")));
                }
                self.cutter_count = x;
                Ok(())
            }
            "random_seed" => {
                self.random_seed = parse_int(val, var)?;
                Ok(())
            }
            "source" => {
                let x: i32 = parse_int(val, var)?;
                if x < -1 {
                    return Err(Error::config(format!("value for \"source\" must satisfy x>=-1, got {x}")));
                }
                self.source = x;
                Ok(())
            }
            "target" => {
                let x: i32 = parse_int(val, var)?;
                if x < -1 {
                    return Err(Error::config(format!("value for \"target\" must satisfy x>=-1, got {x}")));
                }
                self.target = x;
                Ok(())
            }
            "max_cut_size" => {
                let x: i32 = parse_int(val, var)?;
                if x < 1 {
                    return Err(Error::config(format!("value for \"max_cut_size\" must satisfy x>=1, got {x}")));
                }
                self.max_cut_size = x;
                Ok(())
            }
            "max_imbalance" => {
                let x: f32 = val.parse().map_err(|_| Error::config(format!("not a float: {val:?} for max_imbalance")))?;
                if !(0.0..=0.5).contains(&x) {
                    return Err(Error::config(format!("value for \"max_imbalance\" must satisfy 0.0<=x<=0.5, got {x}")));
                }
                self.max_imbalance = x;
                Ok(())
            }
            "branch_factor" => {
                let x: i32 = parse_int(val, var)?;
                if x < 1 {
                    return Err(Error::config(format!("value for \"branch_factor\" must satisfy x>=1, got {x}")));
                }
                self.branch_factor = x;
                Ok(())
            }
            _ => Err(Error::config(format!(
                "unknown config variable {var:?}; valid are SeparatorSelection, AvoidAugmentingPath, SkipNonMaximumSides, \
                 GraphSearchAlgorithm, DumpState, ReportCuts, PierceRating, cutter_count, random_seed, source, target, \
                 max_cut_size, max_imbalance, branch_factor"
            ))),
        }
    }

    /// Get the canonical string form of `var`'s current value.
    pub fn get(&self, var: &str) -> Result<String> {
        let s = match var {
            "SeparatorSelection" | "separator_selection" => self.separator_selection.as_str().to_string(),
            "AvoidAugmentingPath" | "avoid_augmenting_path" => self.avoid_augmenting_path.as_str().to_string(),
            "SkipNonMaximumSides" | "skip_non_maximum_sides" => self.skip_non_maximum_sides.as_str().to_string(),
            "GraphSearchAlgorithm" | "graph_search_algorithm" => self.graph_search_algorithm.as_str().to_string(),
            "DumpState" | "dump_state" => self.dump_state.as_str().to_string(),
            "ReportCuts" | "report_cuts" => self.report_cuts.as_str().to_string(),
            "PierceRating" | "pierce_rating" => self.pierce_rating.as_str().to_string(),
            "cutter_count" => self.cutter_count.to_string(),
            "random_seed" => self.random_seed.to_string(),
            "source" => self.source.to_string(),
            "target" => self.target.to_string(),
            "max_cut_size" => self.max_cut_size.to_string(),
            "max_imbalance" => self.max_imbalance.to_string(),
            "branch_factor" => self.branch_factor.to_string(),
            _ => {
                return Err(Error::config(format!(
                    "unknown config variable {var:?}; valid are SeparatorSelection, AvoidAugmentingPath, SkipNonMaximumSides, \
                     GraphSearchAlgorithm, DumpState, ReportCuts, PierceRating, cutter_count, random_seed, source, target, \
                     max_cut_size, max_imbalance, branch_factor"
                )))
            }
        };
        Ok(s)
    }

    /// A human-readable dump of every field, in the source's fixed order.
    pub fn get_config(&self) -> String {
        const FIELDS: &[&str] = &[
            "SeparatorSelection",
            "AvoidAugmentingPath",
            "SkipNonMaximumSides",
            "GraphSearchAlgorithm",
            "DumpState",
            "ReportCuts",
            "PierceRating",
            "cutter_count",
            "random_seed",
            "source",
            "target",
            "max_cut_size",
            "max_imbalance",
            "branch_factor",
        ];
        let mut out = String::new();
        for &field in FIELDS {
            out.push_str(&format!("{field:>30} : {}\n", self.get(field).unwrap()));
        }
        out
    }
}

fn parse_int(val: &str, var: &str) -> Result<i32> {
    val.parse().map_err(|_| Error::config(format!("not an integer: {val:?} for {var}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_enum_field_round_trips_through_every_admissible_value() {
        let mut cfg = Config::default();
        for v in ["node_min_expansion", "edge_min_expansion", "node_first", "edge_first"] {
            cfg.set("separator_selection", v).unwrap();
            assert_eq!(cfg.get("SeparatorSelection").unwrap(), v);
        }
        for v in ["avoid_and_pick_best", "do_not_avoid", "avoid_and_pick_oldest", "avoid_and_pick_random"] {
            cfg.set("avoid_augmenting_path", v).unwrap();
            assert_eq!(cfg.get("avoid_augmenting_path").unwrap(), v);
        }
        for v in [
            "max_target_minus_source_hop_dist",
            "min_source_hop_dist",
            "max_target_hop_dist",
            "max_target_minus_source_weight_dist",
            "min_source_weight_dist",
            "max_target_weight_dist",
            "random",
            "oldest",
            "max_arc_weight",
            "min_arc_weight",
            "circular_hop",
            "circular_weight",
        ] {
            cfg.set("pierce_rating", v).unwrap();
            assert_eq!(cfg.get("PierceRating").unwrap(), v);
        }
    }

    #[test]
    fn unknown_key_is_config_error() {
        let mut cfg = Config::default();
        assert!(cfg.set("not_a_real_field", "x").is_err());
        assert!(cfg.get("not_a_real_field").is_err());
    }

    #[test]
    fn unknown_enum_value_is_config_error() {
        let mut cfg = Config::default();
        assert!(cfg.set("pierce_rating", "not_a_real_rating").is_err());
    }

    #[test]
    fn numeric_bounds_are_enforced() {
        let mut cfg = Config::default();
        assert!(cfg.set("cutter_count", "0").is_err());
        assert!(cfg.set("max_imbalance", "0.6").is_err());
        assert!(cfg.set("source", "-2").is_err());
        cfg.set("max_imbalance", "0.5").unwrap();
        assert_eq!(cfg.max_imbalance, 0.5);
    }
}
