//! Biovision hierarchy reader.
//!
//! The file is consumed word by word. `HIERARCHY` declares the joints, each
//! with an `OFFSET` and, unless it is an `End Site`, a `CHANNELS` list;
//! `MOTION` is followed by the frame count, the frame time and one line of
//! channel values per frame.

use std::collections::VecDeque;
use std::io::BufRead;

use log::*;

use super::utilities::{bvh_words, number, unsigned, LineReader};
use crate::error::{Error, Result};
use crate::math::{self, Vec3};
use crate::rotation::{Axis, RotationOrder};
use crate::skeleton::{Frame, JointId, Skeleton};

const EFFECTOR: &str = "_Effector";
const MAX_NAME_WORDS: usize = 10;

/// Splits a BVH stream into words, one line at a time.
pub struct Tokenizer<R> {
    lines: LineReader<R>,
    words: VecDeque<String>,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: LineReader::new(reader),
            words: VecDeque::new(),
        }
    }

    pub fn line(&self) -> usize {
        self.lines.line()
    }

    /// The next word, or [`Error::EndOfFile`] once the stream runs dry.
    pub fn word(&mut self) -> Result<String> {
        loop {
            if let Some(word) = self.words.pop_front() {
                return Ok(word);
            }
            let line = self.lines.line() + 1;
            let text = match self.lines.next_line()? {
                Some(text) => text,
                None => return Err(Error::EndOfFile),
            };
            let (_, words) =
                bvh_words(text).map_err(|_| Error::illegal(line, "unreadable line"))?;
            self.words.extend(words.into_iter().map(str::to_owned));
        }
    }

    /// Like [`Tokenizer::word`], but running out of input is illegal here.
    pub fn expect(&mut self, what: &str) -> Result<String> {
        match self.word() {
            Err(Error::EndOfFile) => Err(Error::illegal(
                self.line(),
                format!("file ends where {} was expected", what),
            )),
            other => other,
        }
    }

    fn keyword(&mut self, keyword: &str) -> Result<()> {
        let word = self.expect(keyword)?;
        if word.eq_ignore_ascii_case(keyword) {
            Ok(())
        } else {
            Err(Error::illegal(
                self.line(),
                format!("expected {}, found `{}`", keyword, word),
            ))
        }
    }

    fn number(&mut self, what: &str) -> Result<f64> {
        let word = self.expect(what)?;
        number(&word).ok_or_else(|| {
            Error::illegal(self.line(), format!("`{}` is not a valid {}", word, what))
        })
    }

    fn vector(&mut self, what: &str) -> Result<Vec3> {
        Ok(Vec3::new(
            self.number(what)?,
            self.number(what)?,
            self.number(what)?,
        ))
    }

    /// The word after an optional `:`.
    fn after_colon(&mut self, what: &str) -> Result<String> {
        let word = self.expect(what)?;
        if word == ":" {
            self.expect(what)
        } else {
            Ok(word)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    None,
    Skeleton,
    Motion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Position,
    Rotation,
}

/// Which joint owns the next three values of a motion line, and in which axis order.
#[derive(Debug, Clone, Copy)]
struct ChannelLink {
    joint: JointId,
    channel: Channel,
    axes: [Axis; 3],
}

impl ChannelLink {
    fn order(&self) -> RotationOrder {
        let code: String = self.axes.iter().map(|a| a.letter()).collect();
        RotationOrder::from_code(&code)
    }
}

/// Fills a [`Skeleton`] from a BVH stream.
pub struct BvhReader<'s, R> {
    tokens: Tokenizer<R>,
    skeleton: &'s mut Skeleton,
    stage: Stage,
    links: Vec<ChannelLink>,
    last_name: String,
    motion_read: bool,
}

impl<'s, R: BufRead> BvhReader<'s, R> {
    pub fn new(reader: R, skeleton: &'s mut Skeleton) -> Self {
        Self {
            tokens: Tokenizer::new(reader),
            skeleton,
            stage: Stage::None,
            links: vec![],
            last_name: String::new(),
            motion_read: false,
        }
    }

    pub fn read(mut self) -> Result<()> {
        match self.run() {
            Err(Error::EndOfFile) => self.finish(),
            other => other,
        }
    }

    fn run(&mut self) -> Result<()> {
        loop {
            let word = self.tokens.word()?.to_ascii_uppercase();
            match self.stage {
                Stage::None => {
                    if word == "HIERARCHY" {
                        info!("reading hierarchy");
                        self.stage = Stage::Skeleton;
                    }
                }
                Stage::Skeleton => match word.as_str() {
                    "MOTION" => {
                        info!("reading motion");
                        self.stage = Stage::Motion;
                    }
                    "ROOT" | "JOINT" => self.joint(false)?,
                    "END" => self.joint(true)?,
                    "}" => {
                        if let Err(e) = self.skeleton.go_up() {
                            warn!("line {}: unbalanced `}}` ({})", self.tokens.line(), e);
                        }
                    }
                    _ => trace!("skipping `{}`", word),
                },
                Stage::Motion => self.motion(&word)?,
            }
        }
    }

    fn joint(&mut self, end_site: bool) -> Result<()> {
        let parent = std::mem::take(&mut self.last_name);
        let name = if end_site {
            self.tokens.keyword("SITE")?;
            self.tokens.keyword("{")?;
            if parent.contains(EFFECTOR) {
                warn!(
                    "line {}: `{}` already ends in an effector, renaming",
                    self.tokens.line(),
                    parent
                );
                format!("{}X", parent)
            } else {
                format!("{}{}", parent, EFFECTOR)
            }
        } else {
            let mut words = vec![];
            let mut word = self.tokens.expect("joint name")?;
            while word != "{" && words.len() < MAX_NAME_WORDS {
                words.push(word);
                word = self.tokens.expect("{")?;
            }
            if word != "{" {
                return Err(Error::illegal(self.tokens.line(), "joint name is too long"));
            }
            if words.is_empty() {
                return Err(Error::illegal(self.tokens.line(), "joint has no name"));
            }
            words.join("_")
        };

        self.tokens.keyword("OFFSET")?;
        let offset = self.tokens.vector("offset")?;

        let mut channels = vec![];
        if !end_site {
            self.tokens.keyword("CHANNELS")?;
            let word = self.tokens.expect("channel count")?;
            let line = self.tokens.line();
            let count = unsigned(&word)
                .ok_or_else(|| Error::illegal(line, format!("`{}` is not a channel count", word)))?;
            match count {
                6 => {
                    channels.push((Channel::Position, self.axes()?));
                    channels.push((Channel::Rotation, self.axes()?));
                }
                3 => channels.push((Channel::Rotation, self.axes()?)),
                _ => {
                    return Err(Error::illegal(
                        line,
                        format!("bad channel count {} for `{}`", count, name),
                    ))
                }
            }
        }

        let joint = self.skeleton.add_joint(&name, offset, math::ZERO, 0.)?;
        debug!("joint `{}` with {} channel groups", name, channels.len());
        self.links
            .extend(channels.into_iter().map(|(channel, axes)| ChannelLink {
                joint,
                channel,
                axes,
            }));
        self.last_name = name;
        Ok(())
    }

    fn axes(&mut self) -> Result<[Axis; 3]> {
        let mut axes = [Axis::X; 3];
        for axis in axes.iter_mut() {
            let word = self.tokens.expect("channel")?;
            *axis = word.chars().next().and_then(Axis::from_letter).ok_or_else(|| {
                Error::illegal(self.tokens.line(), format!("unknown channel `{}`", word))
            })?;
        }
        Ok(axes)
    }

    fn motion(&mut self, word: &str) -> Result<()> {
        let line = self.tokens.line();
        if self.motion_read {
            return Err(Error::illegal(line, format!("unexpected `{}` after motion", word)));
        }
        if word != "FRAMES" {
            return Err(Error::illegal(line, format!("expected FRAMES, found `{}`", word)));
        }
        let word = self.tokens.after_colon("frame count")?;
        let frames = unsigned(&word).ok_or_else(|| {
            Error::illegal(self.tokens.line(), format!("`{}` is not a frame count", word))
        })?;
        self.tokens.keyword("FRAME")?;
        self.tokens.keyword("TIME")?;
        let word = self.tokens.after_colon("frame time")?;
        let frame_time = number(&word).ok_or_else(|| {
            Error::illegal(self.tokens.line(), format!("`{}` is not a frame time", word))
        })?;

        let order = self
            .links
            .last()
            .map(ChannelLink::order)
            .ok_or_else(|| Error::illegal(self.tokens.line(), "no channels declared"))?;
        info!(
            "{} frames at {}s, rotation order {}",
            frames, frame_time, order
        );
        self.skeleton.frames = frames;
        self.skeleton.frame_time = frame_time;
        self.skeleton.rotation_order = order;

        for n in 0..frames {
            self.frame()?;
            trace!("frame {} read", n);
        }
        for joint in self.skeleton.joints_mut() {
            if joint.motion.is_empty() {
                joint.motion = vec![Frame::default(); frames];
            }
        }
        self.motion_read = true;
        Ok(())
    }

    fn frame(&mut self) -> Result<()> {
        let mut last: Option<JointId> = None;
        for link in &self.links {
            let mut values = math::ZERO;
            for &axis in link.axes.iter() {
                axis.set(&mut values, self.tokens.number("motion value")?);
            }
            let joint = self
                .skeleton
                .get_mut(link.joint)
                .ok_or_else(|| Error::FatalError("channel lost its joint".into()))?;
            let merge = last == Some(link.joint);
            match joint.motion.last_mut() {
                Some(frame) if merge => match link.channel {
                    Channel::Position => frame.offset = values,
                    Channel::Rotation => frame.rotation = values,
                },
                _ => {
                    let mut frame = Frame::default();
                    match link.channel {
                        Channel::Position => frame.offset = values,
                        Channel::Rotation => frame.rotation = values,
                    }
                    joint.motion.push(frame);
                }
            }
            last = Some(link.joint);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<()> {
        match self.stage {
            Stage::None => Err(Error::illegal(self.tokens.line(), "HIERARCHY not found")),
            Stage::Skeleton => {
                warn!("no motion section, skeleton only");
                Ok(())
            }
            Stage::Motion if !self.motion_read => {
                warn!("motion section is empty");
                Ok(())
            }
            Stage::Motion => {
                if let Some(root) = self.skeleton.root().and_then(|r| self.skeleton.get_mut(r)) {
                    root.offset = math::ZERO;
                }
                Ok(())
            }
        }
    }
}
