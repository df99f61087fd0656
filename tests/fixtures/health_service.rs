pub struct HealthController;

#[controller]
impl HealthController {
    #[get("/health")]
    fn health(&self) {}
}
