//! Bridge inventory records — scenes and actuators as a KLF200 reports them.

use serde::{Deserialize, Serialize};

use crate::error::{HubError, ValidationError};
use crate::id::{ActuatorId, SceneId};

/// A named, predefined multi-actuator action sequence stored on the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    /// Vendor-supplied free-text name.
    pub name: String,
}

impl Scene {
    /// Create a scene record from bridge-reported values.
    pub fn new(id: impl Into<SceneId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when the identifier or name is empty.
    pub fn validate(&self) -> Result<(), HubError> {
        if self.id.as_str().is_empty() {
            return Err(ValidationError::EmptyIdentifier.into());
        }
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }
}

/// An individually controllable device (window or shutter motor) managed by
/// the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actuator {
    pub id: ActuatorId,
    /// Product unique index; doubles as the actuator's display name in
    /// discovery.
    pub unique_index: String,
}

impl Actuator {
    /// Create an actuator record from bridge-reported values.
    pub fn new(id: impl Into<ActuatorId>, unique_index: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            unique_index: unique_index.into(),
        }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Validation`] when the identifier or unique index
    /// is empty.
    pub fn validate(&self) -> Result<(), HubError> {
        if self.id.as_str().is_empty() {
            return Err(ValidationError::EmptyIdentifier.into());
        }
        if self.unique_index.is_empty() {
            return Err(ValidationError::EmptyUniqueIndex.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_valid_scene() {
        let scene = Scene::new("1", "Good Morning");
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn should_reject_scene_with_empty_name() {
        let scene = Scene::new("1", "");
        assert!(matches!(
            scene.validate(),
            Err(HubError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_reject_scene_with_empty_identifier() {
        let scene = Scene::new("", "Good Morning");
        assert!(matches!(
            scene.validate(),
            Err(HubError::Validation(ValidationError::EmptyIdentifier))
        ));
    }

    #[test]
    fn should_reject_actuator_with_empty_unique_index() {
        let actuator = Actuator::new("0", "");
        assert!(matches!(
            actuator.validate(),
            Err(HubError::Validation(ValidationError::EmptyUniqueIndex))
        ));
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let actuator = Actuator::new("0", "56:23:3E:26:0C:1B:00:10");
        let json = serde_json::to_string(&actuator).unwrap();
        let parsed: Actuator = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, actuator);
    }
}
