/*!
# AR Anchor Engine

Scene placement and state engine for camera-tracked AR content.

An external tracking collaborator recognizes physical reference objects and
emits anchor events. This crate decides which of those anchors produce content,
computes where that content goes, keeps a name-indexed scene graph of what was
placed, and runs the interactive state around it (lighting, gestures,
animation timers, session restart).

## Architecture

- **Engine**: owner-thread facade receiving tracking events and UI operations
- **AnchorDeduplicationTracker**: gate deciding which anchors are processed
- **SceneGraph**: slot-mapped node tree with a name index
- **PlacementEngine**: anchor + floor geometry to model transform
- **LightingController**: day/night rig swap
- **GestureTransformController**: clamped pinch scale and stepped translation
- **AnimationCoordinator**: entrance tweens, looping triggers with auto-stop

Rendering, pose estimation and object recognition belong to the collaborators
behind the `TrackingProvider` and `AssetProvider` traits.
*/

// Internal modules
mod error;
mod engine;
mod session;
pub mod log;
pub mod config;
pub mod scene;
pub mod tracking;
pub mod assets;
pub mod placement;
pub mod lighting;
pub mod gesture;
pub mod animation;

// Main anchor3d namespace module
pub mod anchor3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Owner-thread facade and session aggregate
    pub use crate::engine::{Engine, LOADING_STATUS};
    pub use crate::session::SessionState;

    // Configuration
    pub use crate::config::{
        Axis, ChildSpec, EngineConfig, LightPreset, LightingPresets, PlacementRule,
    };

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Tracking sub-module
    pub mod tracking {
        pub use crate::tracking::*;
    }

    // Asset sub-module
    pub mod assets {
        pub use crate::assets::*;
    }

    pub use crate::placement::PlacementEngine;
    pub use crate::lighting::{LightingController, LightingState};
    pub use crate::gesture::{
        GestureTransformController, PinchGesture, StepDirection, TransformStepState,
    };
    pub use crate::animation::AnimationCoordinator;
}

// Re-export math library at crate root
pub use glam;
