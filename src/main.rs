use repeater::error::AppResult;

fn main() -> AppResult<()> {
    repeater::run()
}
