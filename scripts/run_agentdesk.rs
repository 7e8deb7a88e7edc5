use agentdesk_adaptor_terminal::{render_page, TerminalAdaptor, TerminalConfig};
use agentdesk_adaptor_web::{WebUiConfig, WebUiServer};
use agentdesk_client::{AskOutcome, ConsoleSession, ElementIds, HttpTransport, ViewBindings};
use agentdesk_core::config::DEFAULT_UI_PORT;
use agentdesk_core::utils::logger::init_logging_with;
use agentdesk_core::{load_env, McpSettings, ToolSource};
use agentdesk_provider_llm::ChatAgent;
use agentdesk_provider_mcp::McpToolCatalog;
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "run-agentdesk", version, about = "AgentDesk web UI and console client")]
struct Cli {
    #[arg(long, env = "AGENTDESK_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the web UI and answer questions with the configured model
    Serve {
        #[arg(long, env = "AGENTDESK_UI_HOST", default_value = "127.0.0.1")]
        host: String,
        #[arg(long, env = "AGENTDESK_UI_PORT", default_value_t = DEFAULT_UI_PORT)]
        port: u16,
        /// Print log events to the terminal
        #[arg(long)]
        tail_logs: bool,
        /// Only tail events whose target or message contains this
        #[arg(long)]
        log_filter: Option<String>,
    },
    /// Show server, model and tools of a running server
    Info {
        #[arg(long, env = "AGENTDESK_URL", default_value = "http://localhost:8001")]
        url: String,
        /// Expand one tool entry by index, or `all`
        #[arg(long)]
        expand: Option<String>,
    },
    /// Ask a running server one question
    Ask {
        #[arg(long, env = "AGENTDESK_URL", default_value = "http://localhost:8001")]
        url: String,
        #[arg(required = true)]
        question: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_env()?;
    let cli = Cli::parse();
    std::env::set_var("AGENTDESK_LOG_LEVEL", &cli.log_level);
    // the log tail prints redacted events itself
    let tailing = matches!(cli.command, Command::Serve { tail_logs: true, .. });
    init_logging_with(!tailing);

    match cli.command {
        Command::Serve {
            host,
            port,
            tail_logs,
            log_filter,
        } => serve(host, port, tail_logs, log_filter).await,
        Command::Info { url, expand } => info(url, expand).await,
        Command::Ask { url, question } => ask(url, question.join(" ")).await,
    }
}

async fn serve(host: String, port: u16, tail_logs: bool, log_filter: Option<String>) -> anyhow::Result<()> {
    let mcp = McpSettings::from_env();
    let agent = ChatAgent::from_env().context("configuring the chat model")?;

    let server = WebUiServer::new(WebUiConfig {
        enabled: true,
        host,
        port,
        server_url: mcp.server_url.clone(),
    })?;
    let Some(addr) = server.start().await? else {
        bail!("web UI is disabled");
    };
    server.attach_agent(Arc::new(agent));

    match McpToolCatalog::from_settings(&mcp) {
        Some(catalog) => {
            let server = server.clone();
            tokio::spawn(async move {
                match catalog.list_tools().await {
                    Ok(tools) => server.set_tools(tools),
                    Err(e) => tracing::error!("Could not list MCP tools from {}: {}", catalog.endpoint(), e),
                }
            });
        }
        None => tracing::warn!("MCP_SERVER_URL is not set; no tools will be listed"),
    }

    if tail_logs {
        TerminalAdaptor::new(TerminalConfig {
            enabled: true,
            target_filter: log_filter,
        })
        .start()
        .await?;
    }

    println!("AgentDesk UI: http://{}", addr);
    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    Ok(())
}

async fn info(url: String, expand: Option<String>) -> anyhow::Result<()> {
    let session = ConsoleSession::new(HttpTransport::new(url), ViewBindings::new());
    session.load_server_info().await;

    match expand.as_deref() {
        Some("all") => {
            let ids: Vec<String> = session
                .view()
                .read(|p| p.tools.entries().iter().map(|e| e.id.clone()).collect());
            for id in ids {
                session.toggle_tool(&id);
            }
        }
        Some(index) => {
            let index: usize = index.parse().context("--expand takes an index or `all`")?;
            if session.toggle_tool(&ElementIds::tool_id(index)).is_none() {
                bail!("no tool at index {}", index);
            }
        }
        None => {}
    }

    print!("{}", render_page(&session.view().snapshot()));
    Ok(())
}

async fn ask(url: String, question: String) -> anyhow::Result<()> {
    let session = ConsoleSession::new(HttpTransport::new(url), ViewBindings::new());
    let outcome = session.ask_question(&question).await;
    let page = session.view().snapshot();
    for alert in &page.alerts {
        eprintln!("{}", alert);
    }
    if outcome != AskOutcome::Rejected {
        println!("Agent Reasoning [{}]\n{}\n", page.thinking_status, page.thinking_text);
        println!("Response [{}]\n{}", page.response_status, page.response_text);
    }
    if outcome != AskOutcome::Answered {
        bail!("question was not answered ({:?})", outcome);
    }
    Ok(())
}
