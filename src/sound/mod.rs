/// Alert sound
///
/// The alert is compiled into the binary and looked up by name, so `play`
/// works no matter where the binary was copied to.

pub mod player;

pub use player::SoundPlayer;

/// Name of the alert played on a failed command
pub const ALERT_ASSET: &str = "fahhhh.wav";

/// Asset files embedded at compile time
const ASSETS: &[(&str, &[u8])] = &[(ALERT_ASSET, include_bytes!("../../assets/fahhhh.wav"))];

/// Look up a bundled asset by file name
pub fn asset(name: &str) -> Option<&'static [u8]> {
    ASSETS
        .iter()
        .find(|(asset_name, _)| *asset_name == name)
        .map(|(_, bytes)| *bytes)
}
