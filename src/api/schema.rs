use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Result, Schema, ID};

use crate::auth::{AuthService, LoginRequest, RegisterRequest, UserSession};
use crate::models::{AppointmentDto, AuthPayload, CreateAppointment, UpdateAppointment, UserDto};
use crate::services::{parse_appointment_id, AppointmentService};

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the executable schema with both services in its context data.
pub fn build_schema(auth_service: AuthService, appointment_service: AppointmentService) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(auth_service)
        .data(appointment_service)
        .finish()
}

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// The user behind the request's bearer token, if any.
    async fn me(&self, ctx: &Context<'_>) -> Option<UserDto> {
        ctx.data_opt::<UserSession>()
            .map(|session| UserDto::from(&session.user))
    }

    /// Every appointment, earliest start first.
    async fn appointments(&self, ctx: &Context<'_>) -> Result<Vec<AppointmentDto>> {
        let service = ctx.data::<AppointmentService>()?;
        service.list_appointments().await.map_err(|err| err.extend())
    }

    async fn appointment(&self, ctx: &Context<'_>, id: ID) -> Result<AppointmentDto> {
        let service = ctx.data::<AppointmentService>()?;
        let id = parse_appointment_id(&id).map_err(|err| err.extend())?;
        service.get_appointment(id).await.map_err(|err| err.extend())
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn register(
        &self,
        ctx: &Context<'_>,
        email: String,
        password: String,
        name: Option<String>,
    ) -> Result<AuthPayload> {
        let auth_service = ctx.data::<AuthService>()?;
        auth_service
            .register(RegisterRequest {
                email,
                password,
                name,
            })
            .await
            .map_err(|err| err.extend())
    }

    async fn login(&self, ctx: &Context<'_>, email: String, password: String) -> Result<AuthPayload> {
        let auth_service = ctx.data::<AuthService>()?;
        auth_service
            .login(LoginRequest { email, password })
            .await
            .map_err(|err| err.extend())
    }

    async fn create_appointment(
        &self,
        ctx: &Context<'_>,
        input: CreateAppointment,
    ) -> Result<AppointmentDto> {
        let service = ctx.data::<AppointmentService>()?;
        service
            .create_appointment(input)
            .await
            .map_err(|err| err.extend())
    }

    /// Change only the supplied fields of an appointment.
    async fn update_appointment(
        &self,
        ctx: &Context<'_>,
        id: ID,
        input: UpdateAppointment,
    ) -> Result<AppointmentDto> {
        let service = ctx.data::<AppointmentService>()?;
        let id = parse_appointment_id(&id).map_err(|err| err.extend())?;
        service
            .update_appointment(id, input)
            .await
            .map_err(|err| err.extend())
    }

    async fn delete_appointment(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let service = ctx.data::<AppointmentService>()?;
        let id = parse_appointment_id(&id).map_err(|err| err.extend())?;
        service
            .delete_appointment(id)
            .await
            .map(|_| true)
            .map_err(|err| err.extend())
    }
}
