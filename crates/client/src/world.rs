//! The demo world the simulation plays in.
use dominion_core::{
    ActorId, ActorSnapshot, AllianceId, AllianceStructureKind, AllianceStructureLevels,
    ArmoryLoadout, ArmoryStack, BonusFamily, EdictKind, Resources, StatPoints, StructureKind,
    StructureLevels, WarId,
};
use dominion_runtime::{InMemoryStore, RepositoryError, War};

pub const VEX: ActorId = ActorId(1);
pub const ORIN: ActorId = ActorId(2);
pub const SABLE: ActorId = ActorId(3);

const IRON_PACT: AllianceId = AllianceId(1);
const NIGHT_COURT: AllianceId = AllianceId(2);

pub fn seed(store: &InMemoryStore) -> Result<(), RepositoryError> {
    store.insert_actor(
        ActorSnapshot::new(VEX, "Vex")
            .with_alliance(IRON_PACT)
            .with_resources(Resources {
                credits: 250_000,
                workers: 400,
                soldiers: 1_200,
                guards: 300,
                spies: 150,
                sentries: 80,
                attack_turns: 30,
                ..Resources::default()
            })
            .with_stats(StatPoints {
                level: 12,
                strength: 10,
                dexterity: 4,
                ..StatPoints::default()
            })
            .with_structures(
                StructureLevels::new()
                    .with(StructureKind::OffenseUpgrade, 3)
                    .with(StructureKind::EconomyUpgrade, 2)
                    .with(StructureKind::NaniteForge, 5),
            ),
    )?;
    store.insert_actor(
        ActorSnapshot::new(ORIN, "Orin")
            .with_alliance(NIGHT_COURT)
            .with_resources(Resources {
                credits: 180_000,
                workers: 600,
                soldiers: 200,
                guards: 450,
                sentries: 120,
                attack_turns: 10,
                ..Resources::default()
            })
            .with_structures(
                StructureLevels::new()
                    .with(StructureKind::Fortification, 2)
                    .with(StructureKind::SentryUpgrade, 1),
            ),
    )?;
    store.insert_actor(
        ActorSnapshot::new(SABLE, "Sable")
            .with_alliance(IRON_PACT)
            .with_resources(Resources {
                credits: 90_000,
                spies: 400,
                attack_turns: 12,
                ..Resources::default()
            }),
    )?;

    store.set_alliance_structures(
        IRON_PACT,
        AllianceStructureLevels::new()
            .with(AllianceStructureKind::CommandNexus, 1)
            .with(AllianceStructureKind::OrbitalTrainingGrounds, 2)
            .with(AllianceStructureKind::WarlordsThrone, 2),
    )?;
    store.set_alliance_structures(
        NIGHT_COURT,
        AllianceStructureLevels::new().with(AllianceStructureKind::CitadelShield, 3),
    )?;

    store.enact_edict(VEX, EdictKind::MartialLaw)?;
    store.enact_edict(ORIN, EdictKind::FortressDoctrine)?;
    store.set_armory(
        VEX,
        ArmoryLoadout::new()
            .with_generals(2)
            .with_stack(ArmoryStack::new("pulse_rifle", BonusFamily::Offense, 500))
            .with_stack(ArmoryStack::new("cloak_module", BonusFamily::Spy, 100)),
    )?;
    store.set_armory(
        ORIN,
        ArmoryLoadout::new()
            .with_stack(ArmoryStack::new("bastion_array", BonusFamily::Defense, 200))
            .with_stack(ArmoryStack::new("motion_scanner", BonusFamily::Sentry, 120)),
    )?;

    store.declare_war(War {
        id: WarId(1),
        aggressor: IRON_PACT,
        defender: NIGHT_COURT,
        active: true,
    })
}
