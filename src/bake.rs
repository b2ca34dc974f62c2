//! Resolves import options against a parsed [`Skeleton`] and turns each
//! joint's motion into keyframes a host can apply directly.

use log::*;

use crate::error::{Error, Result};
use crate::math::{self, Mat4, Vec3};
use crate::rotation::RotationOrder;
use crate::skeleton::{Frame, Joint, Skeleton};

#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    /// Skip keyframes and only report the joints.
    pub bones_only: bool,
    pub scale: f64,
    pub rotation_order: Option<RotationOrder>,
    pub start_frame: Option<usize>,
    pub end_frame: Option<usize>,
    /// Seconds between keys, instead of the file's frame time.
    pub frame_time: Option<f64>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            bones_only: false,
            scale: 1.,
            rotation_order: None,
            start_frame: None,
            end_frame: None,
            frame_time: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe {
    /// Frame index counted from the start of the range.
    pub frame: usize,
    pub time: f64,
    pub value: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct JointTrack {
    pub name: String,
    pub depth: usize,
    pub parent: Option<String>,
    /// Rest translation, scaled.
    pub translation: Vec3,
    pub orientation: Vec3,
    pub rotation: Vec<Keyframe>,
    pub position: Vec<Keyframe>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    pub rotation_order: RotationOrder,
    /// `rotation_order` read back to front, the order joint rotations are applied in.
    pub joint_order: RotationOrder,
    pub start: usize,
    pub end: usize,
    pub interval: f64,
    pub joints: Vec<JointTrack>,
}

impl Clip {
    pub fn frames(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn duration(&self) -> f64 {
        self.frames() as f64 * self.interval
    }

    pub fn track(&self, name: &str) -> Option<&JointTrack> {
        self.joints.iter().find(|t| t.name == name)
    }
}

pub fn bake(skeleton: &Skeleton, options: &ImportOptions) -> Result<Clip> {
    let rotation_order = options.rotation_order.unwrap_or(skeleton.rotation_order);
    if !rotation_order.is_valid() {
        return Err(Error::illegal(0, "no rotation order to bake with"));
    }
    let start = options.start_frame.unwrap_or(0);
    let end = options
        .end_frame
        .map_or(skeleton.frames, |end| end.min(skeleton.frames));
    let interval = options.frame_time.unwrap_or(skeleton.frame_time);
    if start >= end && !options.bones_only {
        warn!("frame range {}..{} is empty", start, end);
    }
    info!(
        "baking frames {}..{} every {}s, order {}",
        start, end, interval, rotation_order
    );

    let scale = options.scale;
    let mut joints = Vec::with_capacity(skeleton.len());
    for visit in skeleton.preorder() {
        let joint = visit.joint;
        let mut track = JointTrack {
            name: joint.name().to_owned(),
            depth: visit.depth,
            parent: joint
                .parent()
                .and_then(|p| skeleton.get(p))
                .map(|p| p.name().to_owned()),
            translation: joint.offset * scale,
            orientation: joint.rotation,
            rotation: vec![],
            position: vec![],
        };
        if !options.bones_only {
            let translate = visit.depth == 0 || skeleton.has_translation;
            let last = end.min(joint.motion.len());
            for (i, frame) in joint.motion.iter().enumerate().take(last).skip(start) {
                let key = |value| Keyframe {
                    frame: i - start,
                    time: (i - start) as f64 * interval,
                    value,
                };
                track.rotation.push(key(frame.rotation));
                if translate {
                    track.position.push(key((joint.offset + frame.offset) * scale));
                }
            }
            debug!(
                "`{}`: {} rotation keys, {} position keys",
                track.name,
                track.rotation.len(),
                track.position.len()
            );
        }
        joints.push(track);
    }

    Ok(Clip {
        rotation_order,
        joint_order: rotation_order.reverse(),
        start,
        end,
        interval,
        joints,
    })
}

/// Local transform of `joint` at `frame`: translation by the rest offset
/// plus the frame offset, then the base rotation, then the frame rotation.
pub fn local_matrix(joint: &Joint, frame: &Frame, order: RotationOrder) -> Option<Mat4> {
    let base = order.quaternion(joint.rotation)?;
    let motion = order.quaternion(frame.rotation)?;
    let translation = Mat4::from_translation(joint.offset + frame.offset);
    Some(translation * math::to_matrix(base) * math::to_matrix(motion))
}
