mod resources;
mod setup;
mod simulation;
mod state;

use bevy::prelude::*;

use resources::{PurchaseIntent, RuntimeConfig, SnapshotCache};
use state::{AppPhase, EconomyRunState};

pub struct BastionAppPlugin;

impl Plugin for BastionAppPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppPhase>()
            .init_state::<EconomyRunState>()
            .init_resource::<RuntimeConfig>()
            .init_resource::<SnapshotCache>()
            .add_event::<PurchaseIntent>()
            .add_systems(OnEnter(AppPhase::Boot), setup::bootstrap_session)
            .add_systems(
                OnEnter(EconomyRunState::Running),
                simulation::mark_economy_running,
            )
            .add_systems(
                OnEnter(EconomyRunState::Paused),
                simulation::mark_economy_paused,
            )
            .add_systems(
                Update,
                (
                    simulation::auto_spend_cheapest.run_if(auto_spend_enabled),
                    simulation::apply_purchase_intents,
                    simulation::tick_economy.run_if(in_state(EconomyRunState::Running)),
                    simulation::autosave_session,
                    simulation::log_status,
                )
                    .chain()
                    .run_if(in_state(AppPhase::InGame)),
            );
    }
}

fn auto_spend_enabled(config: Res<RuntimeConfig>) -> bool {
    config.auto_spend
}
