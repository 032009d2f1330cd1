use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn welcome() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Welcome to the JobCrafter server! 🚀")
}
