use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use mdtohwpx::{convert, ConvertOptions, PRESETS};

#[derive(Parser)]
#[command(name = "mdtohwpx", about = "Markdown 문서를 HWPX(한글) 형식으로 변환", version)]
struct Cli {
    /// 입력 Markdown 파일 경로
    input: Option<PathBuf>,

    /// 출력 HWPX 파일 경로 (기본값: <input>.hwpx)
    output: Option<PathBuf>,

    /// 스타일 프리셋
    #[arg(short, long, default_value = "default")]
    style: String,

    /// 문서 제목 (content.hpf 메타데이터)
    #[arg(long)]
    title: Option<String>,

    /// 작성자 (content.hpf 메타데이터)
    #[arg(long)]
    author: Option<String>,

    /// 사용 가능한 스타일 프리셋 목록 출력
    #[arg(long, default_value_t = false)]
    list_styles: bool,

    /// 진행 정보 출력
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.list_styles {
        println!("사용 가능한 스타일 프리셋:");
        for preset in PRESETS {
            println!("  - {}", preset);
        }
        return;
    }

    let Some(input) = cli.input.as_deref() else {
        eprintln!("오류: 입력 파일을 지정해야 합니다");
        process::exit(2);
    };
    let output = match cli.output.clone() {
        Some(path) => path,
        None => input.with_extension("hwpx"),
    };

    if cli.verbose {
        eprintln!("입력:   {}", input.display());
        eprintln!("출력:   {}", output.display());
        eprintln!("스타일: {}", cli.style);
    }

    let source = match std::fs::read(input) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("오류: 입력 파일 읽기 실패: {} ({})", input.display(), e);
            process::exit(3);
        }
    };

    let mut options = ConvertOptions {
        title: cli.title.clone(),
        author: cli.author.clone(),
        ..Default::default()
    };
    options.image_resolver = Some(local_image_resolver(input));

    let conversion = match convert(&source, &cli.style, &options) {
        Ok(conversion) => conversion,
        Err(e) => {
            eprintln!("오류: {}", e);
            process::exit(e.exit_code());
        }
    };

    for warning in &conversion.warnings {
        eprintln!("경고: {}", warning);
    }

    if let Err(e) = std::fs::write(&output, &conversion.bytes) {
        eprintln!("오류: 출력 파일 쓰기 실패: {} ({})", output.display(), e);
        process::exit(4);
    }

    if cli.verbose {
        eprintln!("완료: {} 바이트 기록", conversion.bytes.len());
    }
    println!("변환 완료: {}", output.display());
}

/// 입력 파일과 같은 디렉토리를 기준으로 로컬 이미지를 읽는 리졸버.
/// 원격 URL은 코어가 다루지 않으므로 건너뛴다.
fn local_image_resolver(input: &Path) -> mdtohwpx::ImageResolver {
    let base = input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();
    Box::new(move |src| {
        if src.starts_with("http://") || src.starts_with("https://") {
            return None;
        }
        std::fs::read(base.join(src)).ok()
    })
}

