//! Append-only record of every decision taken while dealing.
//!
//! Committed bindings and sampled draws are kept as events in call order. The
//! `Display` impl writes them in the line layout of the persisted log, where
//! all draws for one slot share a line:
//!
//! ```text
//! Generating project index... 1:invalid | 0:valid
//! Generating team member 1 index... 3:valid
//! ```

use std::fmt;

use crate::model::entity::Index;

/// Position of a member inside its team, starting at 0.
pub type Slot = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditEvent {
    BindingResource(Index),
    BindingMember { slot: Slot, index: Index },
    ResourceDraw { index: Index, valid: bool },
    MemberDraw { slot: Slot, index: Index, valid: bool },
    TeamClosed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditTrail {
    events: Vec<AuditEvent>,
}

impl AuditTrail {
    pub fn new() -> AuditTrail {
        AuditTrail::default()
    }

    pub fn record(&mut self, event: AuditEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[AuditEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn rejected(&self) -> usize {
        self.events.iter()
            .filter(|event| matches!(
                event,
                AuditEvent::ResourceDraw { valid: false, .. } | AuditEvent::MemberDraw { valid: false, .. }
            ))
            .count()
    }
}

impl fmt::Display for AuditTrail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // true while a "Generating ..." line waits for its valid draw
        let mut open = false;
        for event in &self.events {
            match *event {
                AuditEvent::BindingResource(index) => {
                    writeln!(f, "Selecting project index... {index}:valid")?;
                }
                AuditEvent::BindingMember { slot, index } => {
                    writeln!(f, "Selecting team member {} index... {index}:valid", slot + 1)?;
                }
                AuditEvent::ResourceDraw { index, valid } => {
                    if !open {
                        write!(f, "Generating project index... ")?;
                    }
                    open = write_draw(f, index, valid)?;
                }
                AuditEvent::MemberDraw { slot, index, valid } => {
                    if !open {
                        write!(f, "Generating team member {} index... ", slot + 1)?;
                    }
                    open = write_draw(f, index, valid)?;
                }
                AuditEvent::TeamClosed => writeln!(f)?,
            }
        }
        Ok(())
    }
}

fn write_draw(f: &mut fmt::Formatter<'_>, index: Index, valid: bool) -> Result<bool, fmt::Error> {
    if valid {
        writeln!(f, "{index}:valid")?;
        Ok(false)
    } else {
        write!(f, "{index}:invalid | ")?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_committed_binding() {
        let mut trail = AuditTrail::new();
        trail.record(AuditEvent::BindingResource(0));
        trail.record(AuditEvent::BindingMember { slot: 0, index: 0 });
        trail.record(AuditEvent::BindingMember { slot: 1, index: 1 });
        trail.record(AuditEvent::TeamClosed);
        assert_eq!(
            trail.to_string(),
            "Selecting project index... 0:valid\n\
             Selecting team member 1 index... 0:valid\n\
             Selecting team member 2 index... 1:valid\n\
             \n"
        );
    }

    #[test]
    fn rejected_draws_share_the_line_of_their_slot() {
        let mut trail = AuditTrail::new();
        trail.record(AuditEvent::ResourceDraw { index: 0, valid: false });
        trail.record(AuditEvent::ResourceDraw { index: 0, valid: false });
        trail.record(AuditEvent::ResourceDraw { index: 1, valid: true });
        trail.record(AuditEvent::MemberDraw { slot: 0, index: 2, valid: true });
        trail.record(AuditEvent::MemberDraw { slot: 1, index: 2, valid: false });
        trail.record(AuditEvent::MemberDraw { slot: 1, index: 3, valid: true });
        trail.record(AuditEvent::TeamClosed);
        assert_eq!(
            trail.to_string(),
            "Generating project index... 0:invalid | 0:invalid | 1:valid\n\
             Generating team member 1 index... 2:valid\n\
             Generating team member 2 index... 2:invalid | 3:valid\n\
             \n"
        );
        assert_eq!(trail.rejected(), 3);
        assert_eq!(trail.len(), 7);
    }

    #[test]
    fn empty_trail_renders_nothing() {
        assert!(AuditTrail::new().is_empty());
        assert_eq!(AuditTrail::new().to_string(), "");
    }
}
