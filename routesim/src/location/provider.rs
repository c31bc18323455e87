//! Location provider capability surface.
//!
//! [`LocationProvider`] mirrors the interface a platform location service
//! exposes to navigation code: permission state, heading state, and
//! start/stop controls for location and heading updates. Providers deliver
//! fixes to a single registered [`LocationObserver`].

use std::fmt;
use std::sync::Arc;

use super::observer::LocationObserver;

/// Location permission state granted to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet.
    #[default]
    NotDetermined,
    /// Location use is restricted by policy.
    Restricted,
    /// The user declined.
    Denied,
    /// Allowed at any time, including in the background.
    AuthorizedAlways,
    /// Allowed only while the application is in use.
    AuthorizedWhenInUse,
}

impl AuthorizationStatus {
    /// Returns true if location updates may be delivered.
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::AuthorizedAlways | Self::AuthorizedWhenInUse)
    }
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotDetermined => write!(f, "Not determined"),
            Self::Restricted => write!(f, "Restricted"),
            Self::Denied => write!(f, "Denied"),
            Self::AuthorizedAlways => write!(f, "Always"),
            Self::AuthorizedWhenInUse => write!(f, "When in use"),
        }
    }
}

/// Precision of the fixes the application may receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyAuthorization {
    /// Full-precision fixes.
    FullAccuracy,
    /// Approximate fixes only.
    ReducedAccuracy,
}

impl fmt::Display for AccuracyAuthorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FullAccuracy => write!(f, "Full"),
            Self::ReducedAccuracy => write!(f, "Reduced"),
        }
    }
}

/// Physical orientation used as the reference for heading values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceOrientation {
    Unknown,
    #[default]
    Portrait,
    PortraitUpsideDown,
    LandscapeLeft,
    LandscapeRight,
    FaceUp,
    FaceDown,
}

/// A compass heading reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heading {
    /// Heading relative to magnetic north, degrees.
    pub magnetic_heading: f64,
    /// Heading relative to true north, degrees (negative if unknown).
    pub true_heading: f64,
    /// Maximum deviation in degrees (negative if invalid).
    pub accuracy: f64,
}

/// A source of location fixes.
///
/// All methods take `&self`; implementations use interior mutability so a
/// provider can be shared between the navigation code and its controls.
pub trait LocationProvider: Send + Sync {
    /// Register the observer that receives fixes, replacing any previous one.
    ///
    /// The provider does not keep the observer alive. `None` clears the slot.
    fn set_observer(&self, observer: Option<&Arc<dyn LocationObserver>>);

    /// Current permission state.
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Current accuracy permission.
    fn accuracy_authorization(&self) -> AccuracyAuthorization;

    /// Most recent heading, if headings are being produced.
    fn heading(&self) -> Option<Heading>;

    /// Orientation used to interpret heading values.
    fn heading_orientation(&self) -> DeviceOrientation;

    /// Ask for permission to use location at any time.
    fn request_always_authorization(&self);

    /// Ask for permission to use location while in use.
    fn request_when_in_use_authorization(&self);

    /// Ask for one-off full accuracy, explained by `purpose_key`.
    fn request_temporary_full_accuracy_authorization(&self, purpose_key: &str);

    /// Begin delivering location fixes.
    fn start_updating_location(&self);

    /// Stop delivering location fixes.
    fn stop_updating_location(&self);

    /// Begin delivering heading updates.
    fn start_updating_heading(&self);

    /// Stop delivering heading updates.
    fn stop_updating_heading(&self);

    /// Hide any heading calibration prompt.
    fn dismiss_heading_calibration_display(&self);
}
