//! Apply scripted actions to a compiled system.

use pf_components::OutletPressure;
use pf_network::Propagation;
use pf_project::schema::{ActionDef, ScenarioDef};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::runtime_compile::SystemRuntime;

/// What one applied action touched.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub action: &'static str,
    pub component: String,
    /// Downstream components recomputed, in visit order.
    pub updated: Vec<String>,
}

/// Apply one action. On error the network is left as it was.
pub fn apply_action(runtime: &mut SystemRuntime, action: &ActionDef) -> AppResult<StepOutcome> {
    let id = runtime.resolve(action.component())?;
    let net = &mut runtime.network;

    let propagation: Propagation = match action {
        ActionDef::Open { .. } => net.open(id)?,
        ActionDef::Close { .. } => net.close(id)?,
        ActionDef::TurnHandle { position, .. } => net.turn_handle(id, *position)?,
        ActionDef::AdjustSpeed { speed_rpm, .. } => net.adjust_speed(id, *speed_rpm)?,
        ActionDef::SetSpeed { speed_rpm, .. } => net.set_speed(id, *speed_rpm)?,
        ActionDef::StartPump {
            speed_rpm,
            flow_gpm,
            outlet_pressure_psi,
            outlet_head_ft,
            ..
        } => {
            let outlet = match (outlet_pressure_psi, outlet_head_ft) {
                (Some(psi), _) => OutletPressure::Psi(*psi),
                (None, Some(ft)) => OutletPressure::Head(*ft),
                (None, None) => {
                    return Err(AppError::Validation(format!(
                        "StartPump on {} needs an outlet pressure or head",
                        action.component()
                    )));
                }
            };
            net.start_pump(id, *speed_rpm, *flow_gpm, outlet)?
        }
        ActionDef::SetLevel { level_ft, .. } => net.set_level(id, *level_ft)?,
        ActionDef::Evaluate { pressure_psi, .. } => net.evaluate(id, *pressure_psi)?,
        ActionDef::SetReliefSetpoints {
            setpoint_open_psi,
            setpoint_close_psi,
            ..
        } => net.set_relief_setpoints(id, *setpoint_open_psi, *setpoint_close_psi)?,
        ActionDef::SetInlet {
            pressure_psi,
            flow_gpm,
            ..
        } => net.set_inlet(id, *pressure_psi, *flow_gpm)?,
    };

    let updated: Vec<String> = propagation
        .names(&runtime.network)
        .into_iter()
        .map(str::to_string)
        .collect();

    info!(
        action = action.label(),
        component = action.component(),
        updated = updated.len(),
        "applied"
    );

    Ok(StepOutcome {
        action: action.label(),
        component: action.component().to_string(),
        updated,
    })
}

/// Apply actions in order, stopping at the first failure.
pub fn apply_all<'a>(
    runtime: &mut SystemRuntime,
    actions: impl IntoIterator<Item = &'a ActionDef>,
) -> AppResult<Vec<StepOutcome>> {
    actions
        .into_iter()
        .map(|action| apply_action(runtime, action))
        .collect()
}

pub fn run_scenario(
    runtime: &mut SystemRuntime,
    scenario: &ScenarioDef,
) -> AppResult<Vec<StepOutcome>> {
    info!(scenario = %scenario.id, steps = scenario.steps.len(), "running scenario");
    apply_all(runtime, &scenario.steps)
}
