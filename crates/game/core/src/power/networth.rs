use crate::config::GameConfig;
use crate::state::ActorSnapshot;

/// Net worth used for prestige: units, structure levels and a slice of credits.
pub fn net_worth(actor: &ActorSnapshot, config: &GameConfig) -> u64 {
    let units = actor.resources.total_units() as f64 * config.get("networth.per_unit", 0.0);
    let structures = actor.structures.total_levels() as f64
        * config.get("networth.per_structure_level", 0.0);
    let divisor = config.get("networth.credit_divisor", 0.0);
    let credits = if divisor > 0.0 {
        actor.resources.credits as f64 / divisor
    } else {
        0.0
    };
    (units + structures + credits).max(0.0).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ActorId, Resources, StructureKind, StructureLevels};

    #[test]
    fn counts_units_structures_and_credits() {
        let actor = ActorSnapshot::new(ActorId(1), "Vex")
            .with_resources(Resources {
                credits: 10_000,
                soldiers: 100,
                guards: 50,
                ..Resources::default()
            })
            .with_structures(StructureLevels::new().with(StructureKind::Fortification, 2));
        // 150 × 5 + 2 × 500 + 10_000 / 100
        assert_eq!(net_worth(&actor, &GameConfig::standard()), 1_850);
        assert_eq!(net_worth(&actor, &GameConfig::empty()), 0);
    }
}
