//! Property-based tests for the selection machine.

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use assetry_core::{AssetLevel, Level};
    use proptest::prelude::*;

    use crate::cache::DropdownCache;
    use crate::graph::DropdownGraph;
    use crate::machine::SelectionMachine;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn cache() -> Arc<DropdownCache<AssetLevel>> {
        let mut graph = DropdownGraph::new(strings(&["Electrical", "Civil"]));
        graph.insert_options(
            AssetLevel::SubCategory,
            "Electrical".into(),
            strings(&["Inverter", "Battery"]),
        );
        graph.insert_options(
            AssetLevel::AssetGroup,
            "Electrical|Inverter".into(),
            strings(&["String"]),
        );
        graph.insert_options(AssetLevel::AssetType, "String".into(), strings(&["3-Phase"]));
        graph.insert_options(AssetLevel::Make, "3-Phase".into(), strings(&["Sungrow"]));
        graph.insert_options(AssetLevel::Model, "Sungrow".into(), strings(&["SG110CX"]));
        graph.insert_identifier("Sungrow|SG110CX".into(), "ELEC-INV-STR-3PH-SUNGROW-SG110CX-001");
        Arc::new(DropdownCache::from_graph(graph))
    }

    fn writes() -> impl Strategy<Value = Vec<(usize, String)>> {
        let input = prop_oneof![
            Just(String::new()),
            Just("electrical".to_string()),
            Just("Inverter".to_string()),
            Just("String".to_string()),
            Just("3-phase".to_string()),
            Just("SUNGROW".to_string()),
            Just("SG110CX".to_string()),
            "[A-Za-z]{1,8}",
        ];
        prop::collection::vec((0usize..6, input), 0..24)
    }

    proptest! {
        #[test]
        fn test_every_accepted_write_invalidates_earlier_tickets(ops in writes()) {
            let mut machine = SelectionMachine::new(cache());
            let mut issued = Vec::new();

            for (index, input) in ops {
                let before = machine.generation();
                match machine.set_value(AssetLevel::ALL[index], &input) {
                    Ok(transition) => {
                        prop_assert_eq!(machine.generation(), before + 1);
                        prop_assert!(machine.identifier().is_none());
                        for ticket in &issued {
                            prop_assert!(!machine.is_current(ticket));
                        }
                        if let Some(ticket) = transition.ticket {
                            prop_assert!(machine.is_current(&ticket));
                            issued.push(ticket);
                        }
                    }
                    Err(_) => {
                        prop_assert_eq!(machine.generation(), before);
                    }
                }
            }
        }

        #[test]
        fn test_unreachable_levels_offer_nothing(ops in writes()) {
            let mut machine = SelectionMachine::new(cache());
            for (index, input) in ops {
                let _ = machine.set_value(AssetLevel::ALL[index], &input);
            }

            for level in AssetLevel::ALL {
                if !machine.path().is_reachable(*level) {
                    prop_assert!(machine.options_for(*level).is_empty());
                }
            }
            prop_assert_eq!(
                machine.pending_ticket().is_some(),
                machine.path().is_complete()
            );
        }
    }
}
