use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use log::*;

pub mod bake;
pub mod error;
pub mod math;
pub mod read;
pub mod rotation;
pub mod skeleton;

pub use error::{Error, Result, Status};
pub use read::Format;
pub use rotation::{Axis, RotationOrder};
pub use skeleton::{Frame, Joint, JointId, Skeleton};

/// Opens a `.bvh`, `.htr` or `.htr2` file and reads it into a new skeleton.
pub fn import<P: AsRef<Path>>(path: P) -> Result<Skeleton> {
    let path = path.as_ref();
    let format = Format::from_path(path).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("`{}` is not a bvh or htr file", path.display()),
        )
    })?;
    info!("importing {} as {:?}", path.display(), format);
    let file = File::open(path)?;
    format.parse(BufReader::new(file))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn import_assets() -> anyhow::Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
        let bvh = import(dir.join("sample.bvh"))?;
        assert_eq!(bvh.frames, 3);
        let htr = import(dir.join("sample_v2.htr"))?;
        assert_eq!(htr.rotation_order, RotationOrder::Xyz);
        Ok(())
    }

    #[test]
    fn import_rejects_unknown_files() {
        let res = import("motion.fbx");
        assert_eq!(Status::of(&res), Status::InvalidStream);
        let res = import("does/not/exist.bvh");
        assert_eq!(Status::of(&res), Status::InvalidStream);
    }
}
