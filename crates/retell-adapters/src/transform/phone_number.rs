use serde_json::Value;

use super::{decode, decode_list};
use crate::error::Result;
use crate::schemas::phone_number::{
    CreatePhoneNumberInput, CreatePhoneNumberRequest, PhoneNumberOutput, UpdatePhoneNumberInput,
    UpdatePhoneNumberRequest,
};

pub fn create_phone_number_request(input: CreatePhoneNumberInput) -> CreatePhoneNumberRequest {
    CreatePhoneNumberRequest {
        area_code: input.area_code,
        inbound_agent_id: input.inbound_agent_id,
        outbound_agent_id: input.outbound_agent_id,
        nickname: input.nickname,
        inbound_webhook_url: input.inbound_webhook_url,
        number_provider: input.number_provider,
    }
}

pub fn update_phone_number_request(
    input: UpdatePhoneNumberInput,
) -> (String, UpdatePhoneNumberRequest) {
    (
        input.phone_number,
        UpdatePhoneNumberRequest {
            inbound_agent_id: input.inbound_agent_id,
            outbound_agent_id: input.outbound_agent_id,
            nickname: input.nickname,
            inbound_webhook_url: input.inbound_webhook_url,
        },
    )
}

pub fn phone_number_output(value: Value) -> Result<PhoneNumberOutput> {
    decode("phone_number", value)
}

pub fn phone_numbers_output(value: Value) -> Result<Vec<PhoneNumberOutput>> {
    decode_list("list_phone_numbers", value)
}
