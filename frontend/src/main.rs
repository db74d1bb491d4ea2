use log::LevelFilter;
use survey_frontend::app::App;
use survey_frontend::logging;

fn main() {
    let _ = logging::init(LevelFilter::Debug);
    yew::Renderer::<App>::new().render();
}
