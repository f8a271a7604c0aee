use serde_json::Value;

use super::{decode, decode_list};
use crate::error::Result;
use crate::schemas::voice::VoiceOutput;

pub fn voice_output(value: Value) -> Result<VoiceOutput> {
    decode("voice", value)
}

pub fn voices_output(value: Value) -> Result<Vec<VoiceOutput>> {
    decode_list("list_voices", value)
}
