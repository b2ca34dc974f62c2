use std::io::BufRead;
use std::path::Path;

use log::*;

use crate::error::{Error, Result};
use crate::skeleton::Skeleton;

pub mod bvh;
pub mod htr;
mod utilities;

pub use bvh::BvhReader;
pub use htr::HtrReader;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Bvh,
    Htr,
}

impl Format {
    /// Guesses the format from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "bvh" => Some(Format::Bvh),
            "htr" | "htr2" => Some(Format::Htr),
            _ => None,
        }
    }

    pub fn parse<R: BufRead>(self, reader: R) -> Result<Skeleton> {
        let mut skeleton = Skeleton::new();
        self.parse_into(reader, &mut skeleton)?;
        if skeleton.is_empty() {
            return Err(Error::InvalidSkeleton("no joints were declared"));
        }
        Ok(skeleton)
    }

    /// Reads into a caller-supplied skeleton, which has to be empty.
    pub fn parse_into<R: BufRead>(self, reader: R, skeleton: &mut Skeleton) -> Result<()> {
        if !skeleton.is_empty() {
            return Err(Error::InvalidSkeleton("skeleton already has joints"));
        }
        debug!("parsing {:?}", self);
        match self {
            Format::Bvh => BvhReader::new(reader, skeleton).read(),
            Format::Htr => HtrReader::new(reader, skeleton).read(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path("walk.bvh"), Some(Format::Bvh));
        assert_eq!(Format::from_path("dir/RUN.BVH"), Some(Format::Bvh));
        assert_eq!(Format::from_path("a.htr"), Some(Format::Htr));
        assert_eq!(Format::from_path("a.htr2"), Some(Format::Htr));
        assert_eq!(Format::from_path("a.fbx"), None);
        assert_eq!(Format::from_path("bvh"), None);
    }

    #[test]
    fn parse_dispatches() {
        let sk = Format::Bvh
            .parse(&include_bytes!("../../assets/sample.bvh")[..])
            .unwrap();
        assert!(sk.find("LeftHip").is_some());
        let sk = Format::Htr
            .parse(&include_bytes!("../../assets/sample.htr")[..])
            .unwrap();
        assert!(sk.find("LThigh").is_some());
    }

    #[test]
    fn empty_hierarchy_is_invalid() {
        let res = Format::Bvh.parse(&b"HIERARCHY\n"[..]);
        assert!(matches!(res, Err(Error::InvalidSkeleton(_))));
    }

    #[test]
    fn parse_into_needs_an_empty_skeleton() {
        let mut sk = Skeleton::new();
        Format::Bvh
            .parse_into(&include_bytes!("../../assets/sample.bvh")[..], &mut sk)
            .unwrap();
        let again = Format::Bvh.parse_into(&include_bytes!("../../assets/sample.bvh")[..], &mut sk);
        assert!(matches!(again, Err(Error::InvalidSkeleton(_))));
    }
}
