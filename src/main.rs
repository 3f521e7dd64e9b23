use clap::Parser;
use std::process::ExitCode;
use tracing::info;

use tube_downloader::catalog::ytdlp::YtDlpCatalog;
use tube_downloader::cli::Cli;
use tube_downloader::common::logger::PrettyLogger;
use tube_downloader::extractor::FfmpegExtractor;
use tube_downloader::orchestrator::Orchestrator;
use tube_downloader::orchestrator::models::DownloadConfig;

#[tokio::main]
async fn main() -> ExitCode {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    // 解析命令行参数
    let args = Cli::parse();

    let Some(mode) = args.mode() else {
        // 未指定模式：只打印使用指引，不做任何 I/O
        PrettyLogger::warning("请指定要下载的内容:");
        println!("  --video: 下载MP4视频");
        println!("  --audio: 下载MP3音频");
        println!("  --both:  下载视频并提取音频");
        return ExitCode::from(1);
    };

    info!("开始处理: {}", args.url);

    let config = DownloadConfig {
        quality: args.quality.clone(),
        output_dir: args.output.clone(),
        container: "mp4".to_string(),
    };

    let catalog = YtDlpCatalog::new();
    let extractor = FfmpegExtractor;
    let orchestrator = Orchestrator::new(&catalog, &extractor, config);

    let outcome = orchestrator.run(&args.url, mode).await;

    PrettyLogger::separator();
    if outcome.fulfilled(mode) {
        let mut items = Vec::new();
        if let Some(video) = &outcome.video {
            items.push(format!("视频: {}", video.display()));
        }
        if let Some(audio) = &outcome.audio {
            items.push(format!("音频: {}", audio.display()));
        }
        PrettyLogger::completion_summary(items);
        ExitCode::SUCCESS
    } else {
        PrettyLogger::error("任务未完成，详见上方日志");
        ExitCode::from(1)
    }
}
