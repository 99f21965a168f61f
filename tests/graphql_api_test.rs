mod common;

use appointment_api::api::schema::AppSchema;
use async_graphql::{Request, Variables};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::TestApp;

const CREATE_APPOINTMENT: &str = r#"
    mutation Create($input: CreateAppointmentInput!) {
        createAppointment(input: $input) {
            id title description startTime endTime status
            clientName clientEmail location notes createdAt updatedAt
        }
    }
"#;

async fn execute(schema: &AppSchema, request: Request) -> Value {
    serde_json::to_value(schema.execute(request).await).unwrap()
}

async fn execute_with(schema: &AppSchema, query: &str, variables: Value) -> Value {
    execute(
        schema,
        Request::new(query).variables(Variables::from_json(variables)),
    )
    .await
}

fn error_code(response: &Value) -> &str {
    response["errors"][0]["extensions"]["code"]
        .as_str()
        .unwrap_or_default()
}

async fn create(schema: &AppSchema, start: &str, end: &str) -> Value {
    let response = execute_with(
        schema,
        CREATE_APPOINTMENT,
        json!({
            "input": {
                "title": "Consultation",
                "startTime": start,
                "endTime": end,
                "clientName": "Grace Hopper",
                "clientEmail": "Grace@Example.com"
            }
        }),
    )
    .await;
    assert!(response.get("errors").is_none(), "{response}");
    response["data"]["createAppointment"].clone()
}

#[tokio::test]
async fn test_create_appointment_wire_shape() {
    let app = TestApp::new();
    let schema = app.schema();

    let appointment = create(&schema, "2024-01-01T10:00:00Z", "2024-01-01T11:00:00Z").await;

    assert_eq!(appointment["title"], "Consultation");
    assert_eq!(appointment["description"], "");
    assert_eq!(appointment["startTime"], "2024-01-01T10:00:00.000Z");
    assert_eq!(appointment["endTime"], "2024-01-01T11:00:00.000Z");
    assert_eq!(appointment["status"], "scheduled");
    assert_eq!(appointment["clientEmail"], "grace@example.com");
    assert_eq!(appointment["location"], "");
    assert_eq!(appointment["notes"], "");
    assert_eq!(appointment["createdAt"], appointment["updatedAt"]);
}

#[tokio::test]
async fn test_appointment_query_round_trip() {
    let app = TestApp::new();
    let schema = app.schema();
    let created = create(&schema, "2024-01-01T10:00:00Z", "2024-01-01T11:00:00Z").await;

    let response = execute_with(
        &schema,
        "query Get($id: ID!) { appointment(id: $id) { id title startTime clientName } }",
        json!({ "id": created["id"] }),
    )
    .await;

    assert_eq!(
        response["data"]["appointment"],
        json!({
            "id": created["id"],
            "title": "Consultation",
            "startTime": "2024-01-01T10:00:00.000Z",
            "clientName": "Grace Hopper"
        })
    );
}

#[tokio::test]
async fn test_error_codes_reach_the_client() {
    let app = TestApp::new();
    let schema = app.schema();

    let response = execute_with(
        &schema,
        CREATE_APPOINTMENT,
        json!({
            "input": {
                "title": "Backwards",
                "startTime": "2024-01-01T11:00:00Z",
                "endTime": "2024-01-01T10:00:00Z",
                "clientName": "Grace Hopper",
                "clientEmail": "grace@example.com"
            }
        }),
    )
    .await;
    assert_eq!(error_code(&response), "INVALID_RANGE");
    assert_eq!(
        response["errors"][0]["message"],
        "End time must be after start time"
    );

    let response = execute_with(
        &schema,
        CREATE_APPOINTMENT,
        json!({
            "input": {
                "title": "Unparseable",
                "startTime": "tomorrow",
                "endTime": "2024-01-01T10:00:00Z",
                "clientName": "Grace Hopper",
                "clientEmail": "grace@example.com"
            }
        }),
    )
    .await;
    assert_eq!(error_code(&response), "INVALID_DATE");

    let response = execute_with(
        &schema,
        "query Get($id: ID!) { appointment(id: $id) { id } }",
        json!({ "id": "not-an-id" }),
    )
    .await;
    assert_eq!(error_code(&response), "NOT_FOUND");
    assert_eq!(response["errors"][0]["message"], "Appointment not found");
}

#[tokio::test]
async fn test_update_and_delete_mutations() {
    let app = TestApp::new();
    let schema = app.schema();
    let created = create(&schema, "2024-01-01T10:00:00Z", "2024-01-01T11:00:00Z").await;

    let response = execute_with(
        &schema,
        r#"mutation Update($id: ID!, $input: UpdateAppointmentInput!) {
            updateAppointment(id: $id, input: $input) { startTime endTime status }
        }"#,
        json!({
            "id": created["id"],
            "input": { "endTime": "2024-01-01T12:00:00Z", "status": "completed" }
        }),
    )
    .await;
    assert_eq!(
        response["data"]["updateAppointment"],
        json!({
            "startTime": "2024-01-01T10:00:00.000Z",
            "endTime": "2024-01-01T12:00:00.000Z",
            "status": "completed"
        })
    );

    let delete = "mutation Delete($id: ID!) { deleteAppointment(id: $id) }";
    let response = execute_with(&schema, delete, json!({ "id": created["id"] })).await;
    assert_eq!(response["data"]["deleteAppointment"], true);

    let response = execute_with(&schema, delete, json!({ "id": created["id"] })).await;
    assert_eq!(error_code(&response), "NOT_FOUND");
}

#[tokio::test]
async fn test_appointments_listed_by_start_time() {
    let app = TestApp::new();
    let schema = app.schema();
    create(&schema, "2024-01-01T10:00:00Z", "2024-01-01T10:30:00Z").await;
    create(&schema, "2024-01-01T09:00:00Z", "2024-01-01T09:30:00Z").await;

    let response = execute(&schema, Request::new("{ appointments { startTime } }")).await;

    assert_eq!(
        response["data"]["appointments"],
        json!([
            { "startTime": "2024-01-01T09:00:00.000Z" },
            { "startTime": "2024-01-01T10:00:00.000Z" }
        ])
    );
}

#[tokio::test]
async fn test_register_login_and_me() {
    let app = TestApp::new();
    let schema = app.schema();

    let response = execute_with(
        &schema,
        r#"mutation Register($email: String!, $password: String!) {
            register(email: $email, password: $password, name: "Ada") {
                token user { id email name role createdAt }
            }
        }"#,
        json!({ "email": "ada@example.com", "password": "analytical" }),
    )
    .await;
    let registered = &response["data"]["register"];
    assert_eq!(registered["user"]["email"], "ada@example.com");
    assert_eq!(registered["user"]["name"], "Ada");
    assert_eq!(registered["user"]["role"], Value::Null);
    assert!(registered["user"].get("password").is_none());

    let response = execute_with(
        &schema,
        r#"mutation { register(email: "ada@example.com", password: "again") { token } }"#,
        Value::Null,
    )
    .await;
    assert_eq!(error_code(&response), "DUPLICATE_EMAIL");

    let response = execute_with(
        &schema,
        r#"mutation { login(email: "ada@example.com", password: "wrong") { token } }"#,
        Value::Null,
    )
    .await;
    assert_eq!(error_code(&response), "INVALID_CREDENTIALS");

    let response = execute_with(
        &schema,
        r#"mutation { login(email: "ada@example.com", password: "analytical") { token } }"#,
        Value::Null,
    )
    .await;
    let token = response["data"]["login"]["token"].as_str().unwrap();

    let session = app
        .auth_service
        .resolve_session(token)
        .await
        .unwrap()
        .unwrap();
    let response = execute(
        &schema,
        Request::new("{ me { id email } }").data(session),
    )
    .await;
    assert_eq!(response["data"]["me"]["id"], registered["user"]["id"]);
    assert_eq!(response["data"]["me"]["email"], "ada@example.com");

    let response = execute(&schema, Request::new("{ me { id } }")).await;
    assert_eq!(response["data"]["me"], Value::Null);
}
