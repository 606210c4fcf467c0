use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::FindFunction(args) => commands::find::handle_function(&args, ctx, flags),
        Commands::FindClass(args) => commands::find::handle_class(&args, ctx, flags),
        Commands::TestFunction(args) => commands::test::handle_function(&args, ctx, flags).await,
        Commands::TestClass(args) => commands::test::handle_class(&args, ctx, flags).await,
        Commands::CreateModel(args) => commands::create_model::handle(&args, ctx, flags).await,
    }
}
