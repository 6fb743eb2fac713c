use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    let app = pollster::block_on(panda_forest::ForestApp::new())?;
    app.run()
}
