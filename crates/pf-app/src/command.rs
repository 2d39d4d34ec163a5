//! One-line operator commands.
//!
//! Each line names a verb, a component id and the verb's arguments:
//!
//! ```text
//! open gate1
//! close gate1
//! turn globe1 40
//! speed pump1 1750          # affinity-law speed change
//! setspeed pump1 0          # store speed without rescaling
//! start pump1 1750 75 7.5   # speed, flow, outlet psi
//! start pump1 1750 75 20 ft # outlet given as head
//! level tank1 18
//! evaluate relief1 150
//! setpoints relief1 60 55
//! inlet valve1 6.06 319.28
//! ```
//!
//! Lines parse into the same [`ActionDef`] values scenario files use.

use pf_project::schema::ActionDef;

use crate::error::{AppError, AppResult};

fn bad(line: &str, reason: impl Into<String>) -> AppError {
    AppError::Command {
        line: line.to_string(),
        reason: reason.into(),
    }
}

fn integer(line: &str, what: &str, token: &str) -> AppResult<i64> {
    token
        .parse::<i64>()
        .map_err(|_| bad(line, format!("{what} must be an integer, got '{token}'")))
}

fn number(line: &str, what: &str, token: &str) -> AppResult<f64> {
    let value = token
        .parse::<f64>()
        .map_err(|_| bad(line, format!("{what} must be a number, got '{token}'")))?;
    if !value.is_finite() {
        return Err(bad(line, format!("{what} must be finite")));
    }
    Ok(value)
}

/// Parse one command line. Text after `#` is ignored.
///
/// Returns `Ok(None)` for blank or comment-only lines.
pub fn parse_command(line: &str) -> AppResult<Option<ActionDef>> {
    let text = line.split('#').next().unwrap_or_default().trim();
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let Some((&verb, rest)) = tokens.split_first() else {
        return Ok(None);
    };
    let Some((&component, args)) = rest.split_first() else {
        return Err(bad(line, format!("'{verb}' needs a component id")));
    };
    let component = component.to_string();

    let arity = |n: usize, usage: &str| -> AppResult<()> {
        if args.len() == n {
            Ok(())
        } else {
            Err(bad(line, format!("usage: {usage}")))
        }
    };

    let action = match verb.to_ascii_lowercase().as_str() {
        "open" => {
            arity(0, "open ID")?;
            ActionDef::Open { component }
        }
        "close" => {
            arity(0, "close ID")?;
            ActionDef::Close { component }
        }
        "turn" => {
            arity(1, "turn ID POSITION")?;
            ActionDef::TurnHandle {
                component,
                position: integer(line, "position", args[0])?,
            }
        }
        "speed" => {
            arity(1, "speed ID RPM")?;
            ActionDef::AdjustSpeed {
                component,
                speed_rpm: integer(line, "speed", args[0])?,
            }
        }
        "setspeed" => {
            arity(1, "setspeed ID RPM")?;
            ActionDef::SetSpeed {
                component,
                speed_rpm: integer(line, "speed", args[0])?,
            }
        }
        "start" => {
            let usage = "start ID RPM FLOW OUTLET [psi|ft]";
            if args.len() != 3 && args.len() != 4 {
                return Err(bad(line, format!("usage: {usage}")));
            }
            let speed_rpm = integer(line, "speed", args[0])?;
            let flow_gpm = number(line, "flow", args[1])?;
            let outlet = number(line, "outlet", args[2])?;
            let (outlet_pressure_psi, outlet_head_ft) = match args.get(3).copied() {
                None | Some("psi") => (Some(outlet), None),
                Some("ft") => (None, Some(outlet)),
                Some(other) => {
                    return Err(bad(line, format!("unknown outlet unit '{other}'")));
                }
            };
            ActionDef::StartPump {
                component,
                speed_rpm,
                flow_gpm,
                outlet_pressure_psi,
                outlet_head_ft,
            }
        }
        "level" => {
            arity(1, "level ID FEET")?;
            ActionDef::SetLevel {
                component,
                level_ft: number(line, "level", args[0])?,
            }
        }
        "evaluate" => {
            arity(1, "evaluate ID PSI")?;
            ActionDef::Evaluate {
                component,
                pressure_psi: number(line, "pressure", args[0])?,
            }
        }
        "setpoints" => {
            arity(2, "setpoints ID OPEN_PSI CLOSE_PSI")?;
            ActionDef::SetReliefSetpoints {
                component,
                setpoint_open_psi: number(line, "open setpoint", args[0])?,
                setpoint_close_psi: number(line, "close setpoint", args[1])?,
            }
        }
        "inlet" => {
            arity(2, "inlet ID PSI GPM")?;
            ActionDef::SetInlet {
                component,
                pressure_psi: number(line, "pressure", args[0])?,
                flow_gpm: number(line, "flow", args[1])?,
            }
        }
        _ => return Err(bad(line, format!("unknown command '{verb}'"))),
    };
    Ok(Some(action))
}

/// Parse several lines, skipping blanks and comments.
pub fn parse_script<'a>(lines: impl IntoIterator<Item = &'a str>) -> AppResult<Vec<ActionDef>> {
    let mut actions = Vec::new();
    for line in lines {
        if let Some(action) = parse_command(line)? {
            actions.push(action);
        }
    }
    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_verb() {
        assert_eq!(
            parse_command("open gate1").unwrap(),
            Some(ActionDef::Open {
                component: "gate1".to_string()
            })
        );
        assert_eq!(
            parse_command("turn globe1 40").unwrap(),
            Some(ActionDef::TurnHandle {
                component: "globe1".to_string(),
                position: 40
            })
        );
        assert_eq!(
            parse_command("start pump1 1750 75 7.5").unwrap(),
            Some(ActionDef::StartPump {
                component: "pump1".to_string(),
                speed_rpm: 1750,
                flow_gpm: 75.0,
                outlet_pressure_psi: Some(7.5),
                outlet_head_ft: None,
            })
        );
        assert_eq!(
            parse_command("START pump1 1750 75 20 ft").unwrap(),
            Some(ActionDef::StartPump {
                component: "pump1".to_string(),
                speed_rpm: 1750,
                flow_gpm: 75.0,
                outlet_pressure_psi: None,
                outlet_head_ft: Some(20.0),
            })
        );
        assert_eq!(
            parse_command("inlet valve1 6.06 319.28").unwrap(),
            Some(ActionDef::SetInlet {
                component: "valve1".to_string(),
                pressure_psi: 6.06,
                flow_gpm: 319.28
            })
        );
        assert!(matches!(
            parse_command("setpoints relief1 60 55").unwrap(),
            Some(ActionDef::SetReliefSetpoints { .. })
        ));
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(parse_command("").unwrap(), None);
        assert_eq!(parse_command("   # just a note").unwrap(), None);
        let script = parse_script(["open a", "", "close a # done"]).unwrap();
        assert_eq!(script.len(), 2);
    }

    #[test]
    fn non_integer_position_and_speed_rejected() {
        assert!(matches!(
            parse_command("turn globe1 40.5"),
            Err(AppError::Command { .. })
        ));
        assert!(parse_command("speed pump1 fast").is_err());
        assert!(parse_command("start pump1 17.5 50 16").is_err());
    }

    #[test]
    fn malformed_lines_rejected() {
        assert!(parse_command("open").is_err());
        assert!(parse_command("open a b").is_err());
        assert!(parse_command("level tank1 NaN").is_err());
        assert!(parse_command("start p 1 2 3 bar").is_err());
        assert!(parse_command("explode tank1").is_err());
    }
}
