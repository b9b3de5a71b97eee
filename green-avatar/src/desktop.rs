#[tokio::main]
async fn main() -> anyhow::Result<()> {
    extern crate green_avatar;

    green_avatar::desktop_main().await
}
