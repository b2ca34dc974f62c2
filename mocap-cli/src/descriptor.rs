use log::*;
use mocap::bake::ImportOptions;
use mocap::RotationOrder;
use serde::{Deserialize, Serialize};

#[derive(Default, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct Config {
    pub bones_only: bool,
    pub scale: Option<f64>,
    pub rotation_order: Option<String>,
    pub start_frame: Option<usize>,
    pub end_frame: Option<usize>,
    pub frame_time: Option<f64>,
    /// Only print joints whose name contains this.
    pub focus: Option<String>,
}

impl Config {
    pub fn options(&self) -> ImportOptions {
        let rotation_order = self.rotation_order.as_deref().and_then(|code| {
            let order = RotationOrder::from_code(code);
            if order.is_valid() {
                Some(order)
            } else {
                warn!("ignoring unknown rotation order `{}` in config", code);
                None
            }
        });
        ImportOptions {
            bones_only: self.bones_only,
            scale: self.scale.unwrap_or(1.),
            rotation_order,
            start_frame: self.start_frame,
            end_frame: self.end_frame,
            frame_time: self.frame_time,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial_config() {
        let config: Config = toml::from_str("scale = 2.5\nrotation_order = \"YXZ\"\n").unwrap();
        let options = config.options();
        assert_eq!(options.scale, 2.5);
        assert_eq!(options.rotation_order, Some(RotationOrder::Yxz));
        assert!(!options.bones_only);
        assert_eq!(options.end_frame, None);
    }

    #[test]
    fn bad_order_is_dropped() {
        let config: Config = toml::from_str("rotation_order = \"abc\"").unwrap();
        assert_eq!(config.options().rotation_order, None);
        assert_eq!(Config::default().options(), ImportOptions::default());
    }
}
