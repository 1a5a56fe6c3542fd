use budget_manager_frontend::{logging, ui::App};

fn main() {
    logging::init();
    yew::Renderer::<App>::new().render();
}
