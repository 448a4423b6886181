use tasktube::error::{exit_codes, Error};

#[test]
fn exit_codes_map_correctly() {
    let user = Error::InvalidArgument("bad".to_string());
    assert_eq!(user.exit_code(), exit_codes::USER_ERROR);

    let config = Error::InvalidConfig("missing".to_string());
    assert_eq!(config.exit_code(), exit_codes::USER_ERROR);

    let op = Error::Transport("fetch tasks");
    assert_eq!(op.exit_code(), exit_codes::OPERATION_FAILED);
}

#[test]
fn transport_error_is_operation_only() {
    // Transport failures expose which operation failed and nothing
    // else: no status codes, no connection details.
    let err = Error::Transport("toggle task status");
    assert_eq!(err.to_string(), "Failed to toggle task status");
}
