use serde_json::Value;

use super::{decode, decode_list};
use crate::error::Result;
use crate::schemas::call::{
    BatchCallOutput, BatchCallTaskRequest, CallOutput, CreateBatchCallInput,
    CreateBatchCallRequest, CreatePhoneCallInput, CreatePhoneCallRequest, CreateWebCallInput,
    CreateWebCallRequest, ListCallsInput, ListCallsRequest, UpdateCallInput, UpdateCallRequest,
};

pub fn phone_call_request(input: CreatePhoneCallInput) -> CreatePhoneCallRequest {
    CreatePhoneCallRequest {
        from_number: input.from_number,
        to_number: input.to_number,
        override_agent_id: input.override_agent_id,
        override_agent_version: input.override_agent_version,
        direction: input.direction,
        metadata: input.metadata,
        retell_llm_dynamic_variables: input.retell_llm_dynamic_variables,
        opt_out_sensitive_data_storage: input.opt_out_sensitive_data_storage,
        opt_in_signed_url: input.opt_in_signed_url,
    }
}

pub fn web_call_request(input: CreateWebCallInput) -> CreateWebCallRequest {
    CreateWebCallRequest {
        agent_id: input.agent_id,
        agent_version: input.agent_version,
        metadata: input.metadata,
        retell_llm_dynamic_variables: input.retell_llm_dynamic_variables,
        opt_out_sensitive_data_storage: input.opt_out_sensitive_data_storage,
        opt_in_signed_url: input.opt_in_signed_url,
    }
}

/// Rename camelCase filters to the upstream snake_case names.
pub fn list_calls_request(input: ListCallsInput) -> ListCallsRequest {
    ListCallsRequest {
        agent_id: input.agent_id,
        start_timestamp: input.start_timestamp,
        end_timestamp: input.end_timestamp,
        limit: input.limit,
        offset: input.offset,
        sort_order: input.sort_order,
    }
}

/// Split the call id from the update body.
pub fn update_call_request(input: UpdateCallInput) -> (String, UpdateCallRequest) {
    (
        input.call_id,
        UpdateCallRequest {
            metadata: input.metadata,
            retell_llm_dynamic_variables: input.dynamic_variables,
            opt_out_sensitive_data_storage: input.opt_out_sensitive_data_storage,
        },
    )
}

pub fn batch_call_request(input: CreateBatchCallInput) -> CreateBatchCallRequest {
    CreateBatchCallRequest {
        from_number: input.from_number,
        name: input.name,
        trigger_timestamp: input.trigger_timestamp,
        tasks: input
            .tasks
            .into_iter()
            .map(|task| BatchCallTaskRequest {
                to_number: task.to_number,
                retell_llm_dynamic_variables: task.retell_llm_dynamic_variables,
            })
            .collect(),
    }
}

pub fn call_output(value: Value) -> Result<CallOutput> {
    decode("call", value)
}

pub fn calls_output(value: Value) -> Result<Vec<CallOutput>> {
    decode_list("list_calls", value)
}

pub fn batch_call_output(value: Value) -> Result<BatchCallOutput> {
    decode("create_batch_call", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::call::{CallDirection, CallStatus, SortOrder};
    use crate::schemas::parse_params;
    use serde_json::json;

    #[test]
    fn phone_call_payload_applies_default_direction() {
        let input: CreatePhoneCallInput = parse_params(
            "create_phone_call",
            json!({"fromNumber": "+15551230000", "toNumber": "+15559998888"}),
        )
        .unwrap();
        let payload = serde_json::to_value(phone_call_request(input)).unwrap();
        assert_eq!(
            payload,
            json!({
                "from_number": "+15551230000",
                "to_number": "+15559998888",
                "direction": "outbound"
            })
        );
    }

    #[test]
    fn list_calls_renames_and_omits_absent_filters() {
        let input: ListCallsInput = parse_params(
            "list_calls",
            json!({"agentId": "agent_1", "limit": 5, "sortOrder": "descending"}),
        )
        .unwrap();
        let request = list_calls_request(input);
        assert_eq!(request.sort_order, Some(SortOrder::Descending));
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({"agent_id": "agent_1", "limit": 5, "sort_order": "descending"})
        );
    }

    #[test]
    fn phone_call_round_trip_restores_overlapping_fields() {
        let input: CreatePhoneCallInput = parse_params(
            "create_phone_call",
            json!({
                "fromNumber": "+15551230000",
                "toNumber": "+15559998888",
                "direction": "inbound",
                "metadata": {"crm_id": "42"},
                "optOutSensitiveDataStorage": true
            }),
        )
        .unwrap();
        let mut echo = serde_json::to_value(phone_call_request(input)).unwrap();
        echo["call_id"] = json!("call_1");
        echo["call_type"] = json!("phone_call");
        echo["call_status"] = json!("registered");
        echo["agent_id"] = json!("agent_1");

        let output = call_output(echo).unwrap();
        assert_eq!(output.from_number.as_deref(), Some("+15551230000"));
        assert_eq!(output.to_number.as_deref(), Some("+15559998888"));
        assert_eq!(output.direction, Some(CallDirection::Inbound));
        assert_eq!(output.metadata, Some(json!({"crm_id": "42"})));
        assert_eq!(output.opt_out_sensitive_data_storage, Some(true));
        assert_eq!(output.call_status, CallStatus::Registered);
    }

    #[test]
    fn call_output_checks_status_and_drops_unknown_fields() {
        let output = call_output(json!({
            "call_id": "call_1",
            "call_type": "web_call",
            "agent_id": "agent_1",
            "call_status": "ended",
        }));
        assert!(output.is_err());

        let output = call_output(json!({
            "call_id": "call_1",
            "call_type": "web_call",
            "agent_id": "agent_1",
            "call_status": "completed",
            "access_token": "tok",
            "llm_latency": {"p50": 1}
        }))
        .unwrap();
        assert_eq!(
            serde_json::to_value(output).unwrap(),
            json!({
                "call_id": "call_1",
                "call_type": "web_call",
                "agent_id": "agent_1",
                "call_status": "completed",
                "access_token": "tok"
            })
        );
    }

    #[test]
    fn batch_call_tasks_are_renamed() {
        let input: CreateBatchCallInput = parse_params(
            "create_batch_call",
            json!({
                "fromNumber": "+15551230000",
                "name": "reminders",
                "tasks": [
                    {"toNumber": "+15559998888", "retellLlmDynamicVariables": {"name": "Ann"}},
                    {"toNumber": "+15559997777"}
                ]
            }),
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(batch_call_request(input)).unwrap(),
            json!({
                "from_number": "+15551230000",
                "name": "reminders",
                "tasks": [
                    {"to_number": "+15559998888", "retell_llm_dynamic_variables": {"name": "Ann"}},
                    {"to_number": "+15559997777"}
                ]
            })
        );
    }
}
