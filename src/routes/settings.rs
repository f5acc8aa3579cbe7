use actix_session::Session;
use actix_web::{Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::forms::main::SettingsForm;
use crate::repository::DieselRepository;
use crate::routes::{redirect, session_key};
use crate::services::ServiceError;
use crate::services::settings as settings_service;

#[post("/settings")]
pub async fn save_settings(
    session: Session,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SettingsForm>,
) -> impl Responder {
    let key = session_key(&session);

    match settings_service::save_settings(repo.get_ref(), &key, form) {
        Ok(_) => FlashMessage::success("Settings saved.").send(),
        Err(ServiceError::Form(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to save settings: {err}");
            FlashMessage::error("Failed to save settings.").send();
        }
    }

    redirect("/")
}
