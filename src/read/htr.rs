//! Motion Analysis hierarchical translation-rotation reader, versions 1 and 2.
//!
//! Sections come in a fixed order: `[Header]`, `[SegmentNames&Hierarchy]`,
//! `[BasePosition]`, the frames and `[EndOfFile]`. Version 1 lists frames
//! per segment under `[Segment]` headers; version 2 lists segments per frame
//! under `Frame N:` lines.

use std::collections::HashMap;
use std::io::BufRead;

use lazy_static::lazy_static;
use log::*;

use super::utilities::{indexed, number, numbers, uncomment, unsigned, LineReader};
use crate::error::{Error, Result};
use crate::math::{self, Vec3};
use crate::rotation::{Axis, RotationOrder};
use crate::skeleton::{Frame, JointId, Skeleton};

const GLOBAL: &str = "GLOBAL";
const MAX_FRAME_RATE: usize = 1000;
const MAX_SEGMENTS: usize = 1000;
/// Offsets below this on every axis count as no translation.
const MOTION_THRESHOLD: f64 = 0.001;
const DEFAULT_PROPORTION: f64 = 0.1;

lazy_static! {
    static ref CALIBRATION_UNITS: HashMap<&'static str, f64> = {
        let mut m = HashMap::new();
        m.insert("mm", 0.1);
        m.insert("cm", 1.0);
        m.insert("m", 100.0);
        m
    };
}

/// Splits an HTR stream into comment-free word lists, one per line.
pub struct Tokenizer<R> {
    lines: LineReader<R>,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
        }
    }

    pub fn line(&self) -> usize {
        self.lines.line()
    }

    /// Words of the next line, possibly none; `None` at the end of the stream.
    pub fn words(&mut self) -> Result<Option<Vec<String>>> {
        Ok(self.lines.next_line()?.map(|text| {
            uncomment(text)
                .split_whitespace()
                .map(str::to_owned)
                .collect()
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    None,
    Header,
    Segment,
    Base,
    Frames,
    Finish,
}

#[derive(Debug, Clone)]
struct Header {
    file_type: String,
    data_type: String,
    version: usize,
    segments: usize,
    frames: usize,
    frame_rate: usize,
    order: RotationOrder,
    scale_factor: f64,
    proportion: f64,
    degrees: bool,
    gravity_axis: Option<Axis>,
    bone_axis: Option<Axis>,
}

impl Default for Header {
    fn default() -> Self {
        Header {
            file_type: "htr".into(),
            data_type: "HTRS".into(),
            version: 1,
            segments: 0,
            frames: 0,
            frame_rate: 60,
            order: RotationOrder::Zyx,
            scale_factor: 1.,
            proportion: DEFAULT_PROPORTION,
            degrees: true,
            gravity_axis: None,
            bone_axis: None,
        }
    }
}

impl Header {
    fn set(&mut self, key: &str, value: &str, line: usize) -> Result<()> {
        let count = || {
            unsigned(value)
                .ok_or_else(|| Error::illegal(line, format!("{} `{}` is not a count", key, value)))
        };
        let key = key.to_ascii_lowercase();
        match key.as_str() {
            "filetype" => self.file_type = value.to_owned(),
            "datatype" => self.data_type = value.to_owned(),
            "fileversion" => self.version = count()?,
            "numsegments" => self.segments = count()?,
            "numframes" => self.frames = count()?,
            "dataframerate" => self.frame_rate = count()?,
            "eulerrotationorder" => self.order = RotationOrder::from_code(value),
            "scalefactor" => {
                self.scale_factor = number(value).ok_or_else(|| {
                    Error::illegal(line, format!("ScaleFactor `{}` is not a number", value))
                })?
            }
            "calibrationunits" => {
                self.proportion = match CALIBRATION_UNITS.get(value.to_ascii_lowercase().as_str())
                {
                    Some(&p) => p,
                    None => {
                        warn!("line {}: unknown calibration units `{}`", line, value);
                        DEFAULT_PROPORTION
                    }
                }
            }
            "rotationunits" => self.degrees = value.eq_ignore_ascii_case("Degrees"),
            "globalaxisofgravity" => self.gravity_axis = value.chars().next().and_then(Axis::from_letter),
            "bonelengthaxis" => self.bone_axis = value.chars().next().and_then(Axis::from_letter),
            _ => {
                debug!("line {}: ignoring header field `{}`", line, key);
                return Ok(());
            }
        }
        debug!("header {} = {}", key, value);
        Ok(())
    }

    fn validate(&self, line: usize) -> Result<()> {
        let fail = |reason: String| Err(Error::illegal(line, reason));
        if !self.file_type.eq_ignore_ascii_case("htr") {
            return fail(format!("unsupported file type `{}`", self.file_type));
        }
        if !self.data_type.eq_ignore_ascii_case("HTRS") {
            return fail(format!("unsupported data type `{}`", self.data_type));
        }
        if self.version != 1 && self.version != 2 {
            return fail(format!("unsupported version {}", self.version));
        }
        if self.frame_rate < 1 || self.frame_rate > MAX_FRAME_RATE {
            return fail(format!("frame rate {} out of range", self.frame_rate));
        }
        if self.segments < 1 || self.segments > MAX_SEGMENTS {
            return fail(format!("segment count {} out of range", self.segments));
        }
        if !self.order.is_valid() {
            return fail("unknown Euler rotation order".into());
        }
        debug!(
            "gravity along {:?}, bone length along {:?}",
            self.gravity_axis, self.bone_axis
        );
        info!(
            "htr v{}: {} segments, {} frames at {}fps, order {}",
            self.version, self.segments, self.frames, self.frame_rate, self.order
        );
        Ok(())
    }

    fn length(&self, v: f64) -> f64 {
        v * self.proportion * self.scale_factor
    }

    fn position(&self, v: &[f64]) -> Vec3 {
        Vec3::new(self.length(v[0]), self.length(v[1]), self.length(v[2]))
    }

    fn angles(&self, v: &[f64]) -> Vec3 {
        let v = Vec3::new(v[0], v[1], v[2]);
        if self.degrees {
            v
        } else {
            math::vec_to_degrees(v)
        }
    }
}

fn section(title: &str, name: &str) -> bool {
    title.eq_ignore_ascii_case(name)
}

/// Fills a [`Skeleton`] from an HTR stream.
pub struct HtrReader<'s, R> {
    tokens: Tokenizer<R>,
    skeleton: &'s mut Skeleton,
    stage: Stage,
    header: Header,
    /// Segments in `[BasePosition]` order, addressed by v2 bone numbers.
    index: Vec<JointId>,
    first: Option<JointId>,
    current: Option<JointId>,
    root_offset: Vec3,
    has_translation: bool,
}

impl<'s, R: BufRead> HtrReader<'s, R> {
    pub fn new(reader: R, skeleton: &'s mut Skeleton) -> Self {
        Self {
            tokens: Tokenizer::new(reader),
            skeleton,
            stage: Stage::None,
            header: Header::default(),
            index: vec![],
            first: None,
            current: None,
            root_offset: math::ZERO,
            has_translation: false,
        }
    }

    pub fn read(mut self) -> Result<()> {
        while self.stage != Stage::Finish {
            let words = match self.tokens.words()? {
                Some(words) => words,
                None => return self.finish_early(),
            };
            if let Some((title, args)) = words.split_first() {
                self.line(title, args)?;
            }
        }
        Ok(())
    }

    fn illegal<S: Into<String>>(&self, reason: S) -> Error {
        Error::illegal(self.tokens.line(), reason)
    }

    fn line(&mut self, title: &str, args: &[String]) -> Result<()> {
        match self.stage {
            Stage::None => {
                if section(title, "[Header]") {
                    self.stage = Stage::Header;
                }
                Ok(())
            }
            Stage::Header => self.header_line(title, args),
            Stage::Segment => self.segment(title, args),
            Stage::Base => self.base(title, args),
            Stage::Frames => {
                if section(title, "[EndOfFile]") {
                    self.finalize();
                    self.stage = Stage::Finish;
                    Ok(())
                } else if self.header.version == 2 {
                    self.frame_v2(title, args)
                } else {
                    self.frame_v1(title, args)
                }
            }
            Stage::Finish => Ok(()),
        }
    }

    fn header_line(&mut self, title: &str, args: &[String]) -> Result<()> {
        if section(title, "[SegmentNames&Hierarchy]") {
            self.header.validate(self.tokens.line())?;
            self.stage = Stage::Segment;
            return Ok(());
        }
        match args {
            [value] => self.header.set(title, value, self.tokens.line()),
            _ => Err(self.illegal(format!("header field `{}` needs one value", title))),
        }
    }

    fn segment(&mut self, title: &str, args: &[String]) -> Result<()> {
        if section(title, "[BasePosition]") {
            info!("{} segments declared", self.skeleton.len());
            self.stage = Stage::Base;
            return Ok(());
        }
        let parent = match args {
            [parent] => parent,
            _ => return Err(self.illegal(format!("segment `{}` needs one parent", title))),
        };
        let is_global = parent.eq_ignore_ascii_case(GLOBAL);
        if self.skeleton.is_empty() {
            if !is_global {
                return Err(self.illegal(format!("first segment `{}` must hang from GLOBAL", title)));
            }
        } else if is_global {
            return Err(self.illegal(format!("second GLOBAL segment `{}`", title)));
        } else {
            let id = self
                .skeleton
                .find(parent)
                .ok_or_else(|| self.illegal(format!("unknown parent `{}`", parent)))?;
            self.skeleton.go_here(id)?;
        }
        let id = self.skeleton.add_joint(title, math::ZERO, math::ZERO, 0.)?;
        if self.first.is_none() {
            self.first = Some(id);
        }
        debug!("segment `{}` under `{}`", title, parent);
        Ok(())
    }

    fn base(&mut self, title: &str, args: &[String]) -> Result<()> {
        if self.header.version == 2 {
            if section(title, "Frame") && args.first().and_then(|a| indexed(a)) == Some(1) {
                self.stage = Stage::Frames;
                return Ok(());
            }
        } else if args.is_empty() {
            let first = self.first.and_then(|id| self.skeleton.get(id));
            if let Some(first) = first {
                if section(title, &format!("[{}]", first.name())) {
                    self.current = self.first;
                    self.stage = Stage::Frames;
                    return Ok(());
                }
            }
        }

        if args.len() != 7 {
            return Err(self.illegal(format!("base position of `{}` needs 7 values", title)));
        }
        let v = numbers(args, self.tokens.line())?;
        let id = match self.skeleton.find(title) {
            Some(id) => id,
            None => {
                warn!(
                    "line {}: base position for unknown segment `{}`, skipped",
                    self.tokens.line(),
                    title
                );
                return Ok(());
            }
        };
        let (offset, rotation) = (self.header.position(&v[0..3]), self.header.angles(&v[3..6]));
        let joint = self
            .skeleton
            .get_mut(id)
            .ok_or_else(|| Error::FatalError("segment vanished".into()))?;
        joint.offset = offset;
        joint.rotation = rotation;
        joint.length = v[6];
        self.index.push(id);
        debug!("base position of `{}`", title);
        Ok(())
    }

    fn frame_v1(&mut self, title: &str, args: &[String]) -> Result<()> {
        if args.is_empty() && title.starts_with('[') && title.ends_with(']') && title.len() > 1 {
            let name = &title[1..title.len() - 1];
            let id = self
                .skeleton
                .find(name)
                .ok_or_else(|| self.illegal(format!("frames for unknown segment `{}`", name)))?;
            self.current = Some(id);
            debug!("frames of `{}`", name);
            return Ok(());
        }
        if args.len() != 7 {
            return Err(self.illegal(format!("frame {} needs 7 values", title)));
        }
        let id = self
            .current
            .ok_or_else(|| self.illegal("frame outside of a segment"))?;
        let v = numbers(args, self.tokens.line())?;
        let frame = Frame {
            offset: self.header.position(&v[0..3]),
            rotation: self.header.angles(&v[3..6]),
            scale: v[6],
        };
        if Some(id) != self.first {
            let moved = (0..3).any(|i| frame.offset[i].abs() > MOTION_THRESHOLD);
            if moved && !self.has_translation {
                debug!("line {}: segment translation found", self.tokens.line());
            }
            self.has_translation |= moved;
        }
        self.push(id, frame)
    }

    fn frame_v2(&mut self, title: &str, args: &[String]) -> Result<()> {
        if section(title, "Frame") {
            return match args.first().and_then(|a| indexed(a)) {
                Some(n) if n >= 1 && n <= self.header.frames => {
                    trace!("frame {}", n);
                    Ok(())
                }
                _ => Err(self.illegal(format!("bad frame header `{} {}`", title, args.join(" ")))),
            };
        }
        if args.len() != 3 && args.len() != 4 {
            return Err(self.illegal(format!("bone line `{}` needs 3 or 4 values", title)));
        }
        let bone = indexed(title)
            .filter(|&n| n <= self.index.len())
            .ok_or_else(|| self.illegal(format!("bad bone number `{}`", title)))?;
        let v = numbers(args, self.tokens.line())?;
        if bone == 0 {
            self.root_offset = self.header.position(&v[0..3]);
            return Ok(());
        }
        let id = self.index[bone - 1];
        let mut frame = Frame {
            offset: if self.skeleton.is_root(id) {
                self.root_offset
            } else {
                math::ZERO
            },
            rotation: self.header.angles(&v[0..3]),
            scale: 1.,
        };
        frame.offset.y += self.header.length(v.get(3).copied().unwrap_or(0.));
        self.push(id, frame)
    }

    fn push(&mut self, id: JointId, frame: Frame) -> Result<()> {
        self.skeleton
            .get_mut(id)
            .ok_or_else(|| Error::FatalError("segment vanished".into()))?
            .motion
            .push(frame);
        Ok(())
    }

    fn finalize(&mut self) {
        let header = &self.header;
        self.skeleton.frames = header.frames;
        self.skeleton.frame_time = 1. / header.frame_rate as f64;
        self.skeleton.rotation_order = header.order;
        self.skeleton.has_translation = self.has_translation;
        for joint in self.skeleton.joints() {
            if joint.motion.len() != header.frames {
                warn!(
                    "`{}` has {} frames, header says {}",
                    joint.name(),
                    joint.motion.len(),
                    header.frames
                );
            }
        }
        info!("htr import done, translation: {}", self.has_translation);
    }

    fn finish_early(mut self) -> Result<()> {
        match self.stage {
            Stage::None => Err(self.illegal("file ends before the header")),
            Stage::Header => {
                warn!("file ends inside the header, no segments read");
                Ok(())
            }
            _ => {
                warn!("missing [EndOfFile]");
                self.finalize();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use cgmath::InnerSpace;

    const SAMPLE: &str = include_str!("../../assets/sample.htr");
    const SAMPLE_V2: &str = include_str!("../../assets/sample_v2.htr");

    const SMALL: &str = "[Header]
FileType htr
DataType HTRS
FileVersion 1
NumSegments 2
NumFrames 2
DataFrameRate 30
EulerRotationOrder ZYX
CalibrationUnits cm
RotationUnits Degrees
ScaleFactor 1.0
[SegmentNames&Hierarchy]
Root GLOBAL
Arm Root
[BasePosition]
Root 1 2 3 0 0 0 10
Arm 0 5 0 0 0 90 5
[Root]
1 10 20 30 1 2 3 1
2 11 21 31 1 2 3 1
[Arm]
1 0 0 0 4 5 6 1
2 0 ARM_Y 0 4 5 6 1
[EndOfFile]
";

    fn read(text: &str) -> Result<Skeleton> {
        let mut skeleton = Skeleton::new();
        HtrReader::new(text.as_bytes(), &mut skeleton).read()?;
        Ok(skeleton)
    }

    fn small(arm_y: &str) -> String {
        SMALL.replace("ARM_Y", arm_y)
    }

    #[test]
    fn v1_small() {
        let sk = read(&small("0")).unwrap();
        assert_eq!(sk.len(), 2);
        assert_eq!(sk.frames, 2);
        assert!((sk.frame_time - 1. / 30.).abs() < 1e-12);
        assert_eq!(sk.rotation_order, RotationOrder::Zyx);
        let root = sk.joint_by_name("Root").unwrap();
        assert_eq!(root.offset, Vec3::new(1., 2., 3.));
        assert_eq!(root.length, 10.);
        assert_eq!(root.motion[1].offset, Vec3::new(11., 21., 31.));
        let arm = sk.joint_by_name("Arm").unwrap();
        assert_eq!(arm.rotation, Vec3::new(0., 0., 90.));
        assert_eq!(arm.motion.len(), 2);
        assert_eq!(arm.motion[0].rotation, Vec3::new(4., 5., 6.));
        assert_eq!(sk.get(arm.parent().unwrap()).unwrap().name(), "Root");
    }

    #[test]
    fn calibration_units_scale_positions() {
        let cm = read(&small("0")).unwrap();
        let mm = read(&small("0").replace("CalibrationUnits cm", "CalibrationUnits mm")).unwrap();
        let m = read(&small("0").replace("CalibrationUnits cm", "CalibrationUnits M")).unwrap();
        let offset = |sk: &Skeleton| sk.joint_by_name("Root").unwrap().motion[0].offset;
        assert_eq!(offset(&cm), Vec3::new(10., 20., 30.));
        assert!((offset(&mm) - Vec3::new(1., 2., 3.)).magnitude() < 1e-9);
        assert_eq!(offset(&m), Vec3::new(1000., 2000., 3000.));
    }

    #[test]
    fn translation_threshold() {
        assert!(!read(&small("0.0005")).unwrap().has_translation);
        assert!(!read(&small("-0.001")).unwrap().has_translation);
        assert!(read(&small("0.002")).unwrap().has_translation);
        // the root moving doesn't count
        assert!(!read(&small("0")).unwrap().has_translation);
    }

    #[test]
    fn radians_are_converted() {
        let text = small("0")
            .replace("RotationUnits Degrees", "RotationUnits Radians")
            .replace("Arm 0 5 0 0 0 90 5", "Arm 0 5 0 0 0 3.141592653589793 5");
        let sk = read(&text).unwrap();
        let arm = sk.joint_by_name("Arm").unwrap();
        assert!((arm.rotation.z - 180.).abs() < 1e-9);
    }

    #[test]
    fn header_is_validated() {
        for (from, to) in &[
            ("FileType htr", "FileType bvh"),
            ("DataType HTRS", "DataType HTRQ"),
            ("FileVersion 1", "FileVersion 3"),
            ("DataFrameRate 30", "DataFrameRate 0"),
            ("DataFrameRate 30", "DataFrameRate 1001"),
            ("NumSegments 2", "NumSegments 0"),
            ("EulerRotationOrder ZYX", "EulerRotationOrder ZZX"),
            ("ScaleFactor 1.0", "ScaleFactor one"),
            ("ScaleFactor 1.0", "ScaleFactor 1.0 2.0"),
        ] {
            let res = read(&small("0").replace(from, to));
            assert!(
                matches!(res, Err(Error::IllegalData { .. })),
                "{} -> {:?}",
                to,
                res
            );
        }
    }

    #[test]
    fn segment_errors() {
        let twice = small("0").replace("Arm Root", "Arm GLOBAL");
        assert!(matches!(read(&twice), Err(Error::IllegalData { line: 14, .. })));
        let orphan = small("0").replace("Arm Root", "Arm Torso");
        assert!(matches!(read(&orphan), Err(Error::IllegalData { .. })));
        let not_global = small("0").replace("Root GLOBAL", "Root World");
        assert!(matches!(read(&not_global), Err(Error::IllegalData { .. })));
        let dup = small("0").replace("Arm Root", "Root Root");
        assert!(matches!(read(&dup), Err(Error::DuplicateName(_))));
    }

    #[test]
    fn base_errors() {
        let short = small("0").replace("Arm 0 5 0 0 0 90 5", "Arm 0 5 0 0 0 90");
        assert!(matches!(read(&short), Err(Error::IllegalData { .. })));
        let bad = small("0").replace("Arm 0 5 0 0 0 90 5", "Arm 0 5 0 0 0 90 x");
        assert!(matches!(read(&bad), Err(Error::IllegalData { .. })));
    }

    #[test]
    fn unknown_base_segment_is_skipped() {
        let text = small("0").replace("Arm 0 5 0 0 0 90 5", "Leg 0 5 0 0 0 90 5");
        let sk = read(&text).unwrap();
        assert_eq!(sk.len(), 2);
        assert!(sk.joint_by_name("Leg").is_none());
        let arm = sk.joint_by_name("Arm").unwrap();
        assert_eq!(arm.offset, Vec3::new(0., 0., 0.));
        assert_eq!(arm.length, 0.);

        let text = small("0").replace(
            "Arm 0 5 0 0 0 90 5\n",
            "Arm 0 5 0 0 0 90 5\nTail 0 0 0 0 0 0 1\n",
        );
        let sk = read(&text).unwrap();
        assert_eq!(sk.len(), 2);
        assert_eq!(sk.joint_by_name("Arm").unwrap().offset, Vec3::new(0., 5., 0.));
    }

    #[test]
    fn unknown_base_segment_keeps_bone_numbers() {
        let text = SAMPLE_V2.replace(
            "Hips 0 90 0 0 0 0 15\n",
            "Hips 0 90 0 0 0 0 15\nTail 0 0 0 0 0 0 1\n",
        );
        let sk = read(&text).unwrap();
        let chest = sk.joint_by_name("Chest").unwrap();
        assert!((chest.motion[1].offset.y - 2.).abs() < 1e-9);
        let extra = text.replace("2: 0 0 0 2", "3: 0 0 0 2");
        assert!(matches!(read(&extra), Err(Error::IllegalData { .. })));
    }

    #[test]
    fn out_of_order_segments() {
        let text = small("0")
            .replace("NumSegments 2", "NumSegments 4")
            .replace("Root GLOBAL\nArm Root\n", "Root GLOBAL\nArm Root\nLeg Root\nHand Arm\n");
        let sk = read(&text).unwrap();
        let inserted: Vec<_> = sk.joints().map(|j| j.name().to_string()).collect();
        assert_eq!(inserted, ["Root", "Arm", "Leg", "Hand"]);
        let tree: Vec<_> = sk.preorder().map(|v| v.joint.name().to_string()).collect();
        assert_eq!(tree, ["Root", "Arm", "Hand", "Leg"]);
    }

    #[test]
    fn comments_and_blank_lines() {
        let text = small("0")
            .replace("[Header]", "# exported\n\n[Header]   # start")
            .replace("Arm Root", "Arm Root # left arm");
        assert_eq!(read(&text).unwrap().len(), 2);
    }

    #[test]
    fn end_of_file_marker() {
        let text = small("0").replace("[EndOfFile]\n", "");
        let sk = read(&text).unwrap();
        assert_eq!(sk.frames, 2);
        let text = format!("{}garbage after the end\n", small("0"));
        assert!(read(&text).is_ok());
        let text = "[Header]\nFileType htr\n";
        assert!(read(text).unwrap().is_empty());
        let res = crate::read::Format::Htr.parse(text.as_bytes());
        assert!(matches!(res, Err(Error::InvalidSkeleton(_))));
        assert!(matches!(read(""), Err(Error::IllegalData { .. })));
    }

    #[test]
    fn sample_v1() {
        let sk = read(SAMPLE).unwrap();
        assert_eq!(sk.len(), 3);
        assert_eq!(sk.frames, 2);
        assert_eq!(sk.rotation_order, RotationOrder::Zyx);
        for joint in sk.joints() {
            assert_eq!(joint.motion.len(), 2, "{}", joint.name());
        }
        let spine = sk.joint_by_name("Spine").unwrap();
        assert!((spine.offset.y - 10.).abs() < 1e-9);
        assert!(sk.has_translation);
    }

    #[test]
    fn sample_v2() {
        let _ = env_logger::builder().is_test(true).try_init();
        let sk = read(SAMPLE_V2).unwrap();
        assert_eq!(sk.len(), 2);
        assert_eq!(sk.frames, 2);
        assert!((sk.frame_time - 1. / 60.).abs() < 1e-12);
        assert_eq!(sk.rotation_order, RotationOrder::Xyz);
        let hips = sk.joint_by_name("Hips").unwrap();
        assert_eq!(hips.motion.len(), 2);
        // root offset from bone 0 plus the length along y
        assert!((hips.motion[1].offset - Vec3::new(1., 92., 3.)).magnitude() < 1e-9);
        assert!((hips.motion[0].rotation.x - 90.).abs() < 1e-9);
        let chest = sk.joint_by_name("Chest").unwrap();
        assert_eq!(chest.motion[0].offset, Vec3::new(0., 0., 0.));
        assert!((chest.motion[1].offset.y - 2.).abs() < 1e-9);
        assert_eq!(chest.motion[1].scale, 1.);
        assert!(!sk.has_translation);
    }

    #[test]
    fn v2_frame_lines() {
        let bad_bone = SAMPLE_V2.replace("2: 0 0 0 2", "3: 0 0 0 2");
        assert!(matches!(read(&bad_bone), Err(Error::IllegalData { .. })));
        let bad_frame = SAMPLE_V2.replace("Frame 2:", "Frame 9:");
        assert!(matches!(read(&bad_frame), Err(Error::IllegalData { .. })));
        let no_colon = SAMPLE_V2.replace("Frame 2:", "Frame 2");
        assert!(matches!(read(&no_colon), Err(Error::IllegalData { .. })));
        let crowded = SAMPLE_V2.replace("2: 0 0 0 2", "2: 0 0 0 2 7");
        assert!(matches!(read(&crowded), Err(Error::IllegalData { .. })));
    }
}
