//! Built-in dependency catalog.
//!
//! Covers what a desktop chemistry workbench needs: a
//! Python runtime, Qt, CMake and a C++ compiler, the scientific Python
//! stack, and optional ML / cheminformatics / plotting extras.
//!
//! Platform-dependent names are picked here, once, by the `*_for_platform`
//! functions.

use super::entry::{CommandSpec, DependencyEntry, PackageSpec};
use super::platform::{Platform, PlatformTable};

/// Build the built-in entries for a platform, in check order.
pub fn builtin_entries(platform: Platform) -> Vec<DependencyEntry> {
    let mut entries = vec![
        python_entry(platform),
        qt_entry(),
        cmake_entry(),
        compiler_entry(platform),
    ];
    entries.extend(required_packages(platform));
    entries.extend(optional_packages());
    entries
}

fn install(windows: &str, linux: &str, macos: &str) -> PlatformTable<String> {
    PlatformTable::new()
        .with(Platform::Windows, windows.to_string())
        .with(Platform::Linux, linux.to_string())
        .with(Platform::MacOS, macos.to_string())
}

/// Pointer to the bundled install scripts, shown after install help.
pub fn install_hint_for_platform(platform: Platform) -> String {
    let script = match platform {
        Platform::Windows => "scripts\\install_dependencies.bat",
        _ => "./scripts/install_dependencies.sh",
    };
    format!("Run {} to install all dependencies at once", script)
}

/// Interpreter commands to try, in order.
pub fn interpreters_for_platform(platform: Platform) -> Vec<String> {
    let names: &[&str] = match platform {
        Platform::Windows => &["python", "py"],
        _ => &["python3", "python"],
    };
    names.iter().map(|s| s.to_string()).collect()
}

fn python_entry(platform: Platform) -> DependencyEntry {
    let candidates = interpreters_for_platform(platform)
        .iter()
        .map(|interpreter| CommandSpec::new(interpreter, &["--version"]).requiring_success())
        .collect();

    DependencyEntry::tool("python", "Python", Some("3.8"), candidates).with_install(install(
        "Download and install Python 3.8 or later from https://www.python.org",
        "Ubuntu/Debian: sudo apt-get install python3 python3-pip\nCentOS/RHEL: sudo yum install python3 python3-pip",
        "Homebrew: brew install python3\nor download the installer from https://www.python.org",
    ))
}

fn qt_entry() -> DependencyEntry {
    DependencyEntry::tool(
        "qt",
        "Qt",
        Some("5.15"),
        vec![
            CommandSpec::new("qmake", &["-version"]),
            CommandSpec::new("pkg-config", &["--modversion", "Qt5Core"]).requiring_success(),
        ],
    )
    .with_install(install(
        "Download and install Qt 5.15 or later from https://www.qt.io",
        "Ubuntu/Debian: sudo apt-get install qt5-default qtbase5-dev qttools5-dev\nCentOS/RHEL: sudo yum install qt5-qtbase-devel qt5-qttools-devel",
        "Homebrew: brew install qt5",
    ))
}

fn cmake_entry() -> DependencyEntry {
    DependencyEntry::tool(
        "cmake",
        "CMake",
        Some("3.10"),
        vec![CommandSpec::new("cmake", &["--version"])],
    )
    .with_install(install(
        "Download and install CMake from https://cmake.org",
        "Ubuntu/Debian: sudo apt-get install cmake\nCentOS/RHEL: sudo yum install cmake",
        "Homebrew: brew install cmake",
    ))
}

/// C++ compiler commands to try, in order.
pub fn compilers_for_platform(platform: Platform) -> Vec<CommandSpec> {
    match platform {
        Platform::Windows => vec![CommandSpec::new("cl", &[])],
        Platform::Linux => vec![
            CommandSpec::new("g++", &["--version"]),
            CommandSpec::new("clang++", &["--version"]),
        ],
        Platform::MacOS => vec![
            CommandSpec::new("clang++", &["--version"]),
            CommandSpec::new("g++", &["--version"]),
        ],
        Platform::Other => vec![
            CommandSpec::new("c++", &["--version"]),
            CommandSpec::new("g++", &["--version"]),
            CommandSpec::new("clang++", &["--version"]),
        ],
    }
}

fn compiler_entry(platform: Platform) -> DependencyEntry {
    DependencyEntry::compiler("compiler", "C++ Compiler", compilers_for_platform(platform))
        .with_install(install(
            "Install Visual Studio 2019 or later with the C++ development workload",
            "Ubuntu/Debian: sudo apt-get install build-essential\nCentOS/RHEL: sudo yum groupinstall \"Development Tools\"",
            "Install the Xcode command line tools: xcode-select --install",
        ))
}

/// A package whose name and minimum version depend on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageBinding {
    pub name: &'static str,
    pub module: &'static str,
    pub pip_name: &'static str,
    pub minimum: &'static str,
}

/// The Qt binding package: PyQt6 on macOS, PyQt5 elsewhere.
pub fn qt_binding_for_platform(platform: Platform) -> PackageBinding {
    match platform {
        Platform::MacOS => PackageBinding {
            name: "PyQt6",
            module: "PyQt6",
            pip_name: "PyQt6",
            minimum: "6.0",
        },
        _ => PackageBinding {
            name: "pyqt5",
            module: "PyQt5",
            pip_name: "PyQt5",
            minimum: "5.15",
        },
    }
}

/// The Qt WebEngine binding, matching [`qt_binding_for_platform`].
pub fn webengine_binding_for_platform(platform: Platform) -> PackageBinding {
    match platform {
        Platform::MacOS => PackageBinding {
            name: "PyQt6-WebEngine",
            module: "PyQt6.QtWebEngineWidgets",
            pip_name: "PyQt6-WebEngine",
            minimum: "6.0",
        },
        _ => PackageBinding {
            name: "pyqtwebengine",
            module: "PyQt5.QtWebEngineWidgets",
            pip_name: "PyQtWebEngine",
            minimum: "5.15",
        },
    }
}

fn binding_entry(binding: PackageBinding) -> DependencyEntry {
    DependencyEntry::package(
        binding.name,
        binding.minimum,
        PackageSpec::with_module(binding.module, binding.pip_name),
    )
}

fn required_packages(platform: Platform) -> Vec<DependencyEntry> {
    vec![
        DependencyEntry::package("numpy", "1.19", PackageSpec::new("numpy")),
        DependencyEntry::package("pandas", "1.3", PackageSpec::new("pandas")),
        DependencyEntry::package("matplotlib", "3.3", PackageSpec::new("matplotlib")),
        DependencyEntry::package(
            "scikit-learn",
            "0.24",
            PackageSpec::with_module("sklearn", "scikit-learn"),
        ),
        DependencyEntry::package("requests", "2.25", PackageSpec::new("requests")),
        binding_entry(qt_binding_for_platform(platform)),
        binding_entry(webengine_binding_for_platform(platform)),
    ]
}

fn optional_packages() -> Vec<DependencyEntry> {
    vec![
        DependencyEntry::package(
            "rdkit",
            "2021.09",
            PackageSpec::with_module("rdkit", "rdkit-pypi").via_conda("rdkit"),
        )
        .optional()
        .with_build_flag("ENABLE_RDKIT"),
        DependencyEntry::package("mlpack", "4.0", PackageSpec::new("mlpack"))
            .optional()
            .with_build_flag("ENABLE_MLPACK"),
        DependencyEntry::package("tensorflow", "2.6", PackageSpec::new("tensorflow")).optional(),
        DependencyEntry::package("torch", "1.9", PackageSpec::new("torch")).optional(),
        DependencyEntry::package("torchvision", "0.10", PackageSpec::new("torchvision"))
            .optional(),
        DependencyEntry::package("jupyter", "1.0", PackageSpec::new("jupyter")).optional(),
        DependencyEntry::package("seaborn", "0.11", PackageSpec::new("seaborn")).optional(),
        DependencyEntry::package("plotly", "5.0", PackageSpec::new("plotly")).optional(),
        DependencyEntry::package(
            "openbabel",
            "3.0",
            PackageSpec::new("openbabel").via_conda("openbabel"),
        )
        .optional(),
        DependencyEntry::package(
            "biopython",
            "1.79",
            PackageSpec::with_module("Bio", "biopython"),
        )
        .optional(),
        DependencyEntry::package("simpy", "4.0", PackageSpec::new("simpy")).optional(),
        DependencyEntry::package("networkx", "2.6", PackageSpec::new("networkx")).optional(),
        DependencyEntry::package("joblib", "1.1", PackageSpec::new("joblib")).optional(),
    ]
}
