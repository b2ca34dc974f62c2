//! Joint tree filled in by the readers.
//!
//! Joints live in an arena owned by the [`Skeleton`] and refer to each other
//! through [`JointId`]s. The tree is built through a cursor: [`Skeleton::add_joint`]
//! appends under the cursor and moves onto the new joint, [`Skeleton::go_up`],
//! [`Skeleton::go_top`] and [`Skeleton::go_here`] move it around.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::*;

use crate::error::{Error, Result};
use crate::math::{self, Vec3};
use crate::rotation::RotationOrder;

static NEXT_SKELETON: AtomicUsize = AtomicUsize::new(0);

/// Handle to a joint, only valid for the skeleton that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointId {
    owner: usize,
    index: usize,
}

impl JointId {
    pub fn index(self) -> usize {
        self.index
    }
}

/// One timestep of a joint's local transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub offset: Vec3,
    pub rotation: Vec3,
    pub scale: f64,
}

impl Default for Frame {
    fn default() -> Self {
        Frame {
            offset: math::ZERO,
            rotation: math::ZERO,
            scale: 1.,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    name: String,
    parent: Option<JointId>,
    children: Vec<JointId>,
    pub offset: Vec3,
    /// Base orientation, only filled in by HTR.
    pub rotation: Vec3,
    /// Bone length, HTR only.
    pub length: f64,
    pub motion: Vec<Frame>,
}

impl Joint {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<JointId> {
        self.parent
    }

    pub fn children(&self) -> &[JointId] {
        &self.children
    }
}

impl fmt::Display for Joint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = |v: Vec3| format!("({}, {}, {})", v.x, v.y, v.z);
        write!(
            f,
            "{}[ {}, {}, {} ]",
            self.name,
            v(self.offset),
            v(self.rotation),
            self.length
        )
    }
}

#[derive(Debug)]
pub struct Skeleton {
    id: usize,
    joints: Vec<Joint>,
    names: HashMap<String, JointId>,
    current: Option<JointId>,

    pub frames: usize,
    /// Seconds per frame.
    pub frame_time: f64,
    pub rotation_order: RotationOrder,
    pub scale_orientation: u32,
    /// Whether joints besides the root carry positional animation.
    pub has_translation: bool,
}

impl Default for Skeleton {
    fn default() -> Self {
        Skeleton {
            id: NEXT_SKELETON.fetch_add(1, Ordering::Relaxed),
            joints: vec![],
            names: HashMap::new(),
            current: None,
            frames: 0,
            frame_time: 0.4,
            rotation_order: RotationOrder::Zxy,
            scale_orientation: 0,
            has_translation: false,
        }
    }
}

impl Skeleton {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn root(&self) -> Option<JointId> {
        if self.joints.is_empty() {
            None
        } else {
            Some(self.id_at(0))
        }
    }

    pub fn is_root(&self, id: JointId) -> bool {
        self.contains(id) && id.index == 0
    }

    /// Whether `id` was issued by this skeleton.
    pub fn contains(&self, id: JointId) -> bool {
        id.owner == self.id && id.index < self.joints.len()
    }

    fn id_at(&self, index: usize) -> JointId {
        JointId {
            owner: self.id,
            index,
        }
    }

    /// Adds a joint under the cursor (or as the root of an empty skeleton)
    /// and moves the cursor onto it.
    pub fn add_joint(
        &mut self,
        name: &str,
        offset: Vec3,
        rotation: Vec3,
        length: f64,
    ) -> Result<JointId> {
        if self.names.contains_key(name) {
            return Err(Error::DuplicateName(name.to_owned()));
        }
        if self.current.is_none() && !self.joints.is_empty() {
            return Err(Error::InvalidJoint("root is already set"));
        }
        let id = self.id_at(self.joints.len());
        self.joints.push(Joint {
            name: name.to_owned(),
            parent: self.current,
            children: vec![],
            offset,
            rotation,
            length,
            motion: vec![],
        });
        if let Some(parent) = self.current {
            self.joints[parent.index].children.push(id);
        }
        self.names.insert(name.to_owned(), id);
        self.current = Some(id);
        trace!("added joint `{}` at {}", name, id.index);
        Ok(id)
    }

    /// Moves the cursor to its parent. The cursor stays put when it is
    /// already at the root.
    pub fn go_up(&mut self) -> Result<()> {
        let current = self
            .current
            .ok_or(Error::InvalidJoint("cursor is not set"))?;
        let parent = self.joints[current.index]
            .parent
            .ok_or(Error::InvalidJoint("cursor is at the root"))?;
        self.current = Some(parent);
        Ok(())
    }

    pub fn go_top(&mut self) -> Result<()> {
        let root = self.root().ok_or(Error::InvalidJoint("skeleton is empty"))?;
        self.current = Some(root);
        Ok(())
    }

    pub fn go_here(&mut self, id: JointId) -> Result<()> {
        if !self.contains(id) {
            return Err(Error::InvalidJoint("joint belongs to another skeleton"));
        }
        self.current = Some(id);
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<JointId> {
        self.names.get(name).copied()
    }

    pub fn joint_by_name(&self, name: &str) -> Option<&Joint> {
        self.find(name).map(|id| &self.joints[id.index])
    }

    pub fn joint_by_name_mut(&mut self, name: &str) -> Option<&mut Joint> {
        let id = self.find(name)?;
        Some(&mut self.joints[id.index])
    }

    /// The joint under the cursor.
    pub fn current(&self) -> Option<JointId> {
        self.current
    }

    pub fn current_joint(&self) -> Option<&Joint> {
        self.current.map(|id| &self.joints[id.index])
    }

    pub fn current_joint_mut(&mut self) -> Option<&mut Joint> {
        let id = self.current?;
        Some(&mut self.joints[id.index])
    }

    pub fn get(&self, id: JointId) -> Option<&Joint> {
        if self.contains(id) {
            self.joints.get(id.index)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, id: JointId) -> Option<&mut Joint> {
        if self.contains(id) {
            self.joints.get_mut(id.index)
        } else {
            None
        }
    }

    /// Joints in insertion order. Joints attached through [`Skeleton::go_here`]
    /// can land after another subtree, so this is not a tree order; walk
    /// [`Skeleton::preorder`] for that.
    pub fn joints(&self) -> impl Iterator<Item = &Joint> {
        self.joints.iter()
    }

    pub(crate) fn joints_mut(&mut self) -> impl Iterator<Item = &mut Joint> {
        self.joints.iter_mut()
    }

    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            skeleton: self,
            stack: self.root().map(|r| (r, 0)).into_iter().collect(),
        }
    }

    pub fn postorder(&self) -> Postorder<'_> {
        Postorder {
            skeleton: self,
            stack: self.root().map(|r| (r, 0, false)).into_iter().collect(),
        }
    }
}

/// A joint reached during a traversal.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub id: JointId,
    pub joint: &'a Joint,
    pub depth: usize,
}

pub struct Preorder<'a> {
    skeleton: &'a Skeleton,
    stack: Vec<(JointId, usize)>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let joint = &self.skeleton.joints[id.index];
        self.stack
            .extend(joint.children.iter().rev().map(|&c| (c, depth + 1)));
        Some(Visit { id, joint, depth })
    }
}

pub struct Postorder<'a> {
    skeleton: &'a Skeleton,
    stack: Vec<(JointId, usize, bool)>,
}

impl<'a> Iterator for Postorder<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (id, depth, expanded) = self.stack.pop()?;
            let joint = &self.skeleton.joints[id.index];
            if expanded {
                return Some(Visit { id, joint, depth });
            }
            self.stack.push((id, depth, true));
            self.stack
                .extend(joint.children.iter().rev().map(|&c| (c, depth + 1, false)));
        }
    }
}

impl fmt::Display for Skeleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for visit in self.preorder() {
            writeln!(f, "{:indent$}{}", "", visit.joint, indent = visit.depth)?;
        }
        Ok(())
    }
}
