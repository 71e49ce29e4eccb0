//! Windows API and binary constants.

#![allow(non_upper_case_globals)]

pub type DWORD = u32;
pub type UINT = u32;
pub type WORD = u16;
pub type LANGID = WORD;


pub const VS_COMMENTS: &str = "Comments";
pub const VS_COMPANY_NAME: &str = "CompanyName";
pub const VS_FILE_DESCRIPTION: &str = "FileDescription";
pub const VS_FILE_VERSION: &str = "FileVersion";
pub const VS_INTERNAL_NAME: &str = "InternalName";
pub const VS_LEGAL_COPYRIGHT: &str = "LegalCopyright";
pub const VS_LEGAL_TRADEMARKS: &str = "LegalTrademarks";
pub const VS_ORIGINAL_FILENAME: &str = "OriginalFilename";
pub const VS_PRIVATE_BUILD: &str = "PrivateBuild";
pub const VS_PRODUCT_NAME: &str = "ProductName";
pub const VS_PRODUCT_VERSION: &str = "ProductVersion";
pub const VS_SPECIAL_BUILD: &str = "SpecialBuild";

// https://learn.microsoft.com/en-us/windows/win32/menurc/vs-versioninfo
pub const VS_VERSION_INFO: &str = "VS_VERSION_INFO";
pub const VS_STRING_FILE_INFO: &str = "StringFileInfo";
pub const VS_VAR_FILE_INFO: &str = "VarFileInfo";
pub const VS_TRANSLATION: &str = "Translation";

pub const VS_VALUE_BINARY: WORD = 0;
pub const VS_VALUE_TEXT: WORD = 1;


// https://docs.microsoft.com/en-us/openspecs/windows_protocols/ms-lcid/a9eac961-e77d-41a6-90a5-ce1a8b0cdb9c
pub const LANGUAGE_ID_EN_US: LANGID = 1033; // 0x0409, en-US
// https://docs.microsoft.com/en-us/openspecs/windows_protocols/ms-ucoderef/28fefe92-d66c-4b03-90a9-97b473223d43
pub const CODE_PAGE_ID_EN_US: LANGID = 1200; // 0x04B0, UTF-16LE

pub const LANG_NEUTRAL: WORD = 0x00;
pub const LANG_ENGLISH: WORD = 0x09;
pub const SUBLANG_NEUTRAL: WORD = 0x00;
pub const SUBLANG_DEFAULT: WORD = 0x01;
pub const SUBLANG_ENGLISH_US: WORD = 0x01;


// https://docs.microsoft.com/en-us/windows/win32/api/verrsrc/ns-verrsrc-vs_fixedfileinfo

pub const VOS_UNKNOWN: DWORD = 0x00000000;
pub const VOS_DOS: DWORD = 0x00010000;
pub const VOS_NT: DWORD = 0x00040000;
pub const VOS__WINDOWS16: DWORD = 0x00000001;
pub const VOS__WINDOWS32: DWORD = 0x00000004;
pub const VOS_OS216: DWORD = 0x00020000;
pub const VOS_OS232: DWORD = 0x00030000;
pub const VOS__PM16: DWORD = 0x00000002;
pub const VOS__PM32: DWORD = 0x00000003;
pub const VOS_NT_WINDOWS32: DWORD = VOS_NT | VOS__WINDOWS32;

pub const VFT_UNKNOWN: DWORD = 0x00000000;
pub const VFT_APP: DWORD = 0x00000001;
pub const VFT_DLL: DWORD = 0x00000002;
pub const VFT_DRV: DWORD = 0x00000003;
pub const VFT_FONT: DWORD = 0x00000004;
pub const VFT_STATIC_LIB: DWORD = 0x00000007;
pub const VFT_VXD: DWORD = 0x00000005;

pub const VFT2_UNKNOWN: DWORD = 0x00000000;
pub const VFT2_DRV_COMM: DWORD = 0x0000000A;
pub const VFT2_DRV_DISPLAY: DWORD = 0x00000004;
pub const VFT2_DRV_INSTALLABLE: DWORD = 0x00000008;
pub const VFT2_DRV_KEYBOARD: DWORD = 0x00000002;
pub const VFT2_DRV_LANGUAGE: DWORD = 0x00000003;
pub const VFT2_DRV_MOUSE: DWORD = 0x00000005;
pub const VFT2_DRV_NETWORK: DWORD = 0x00000006;
pub const VFT2_DRV_PRINTER: DWORD = 0x00000001;
pub const VFT2_DRV_SOUND: DWORD = 0x00000009;
pub const VFT2_DRV_SYSTEM: DWORD = 0x00000007;
pub const VFT2_DRV_VERSIONED_PRINTER: DWORD = 0x0000000C;
pub const VFT2_FONT_RASTER: DWORD = 0x00000001;
pub const VFT2_FONT_TRUETYPE: DWORD = 0x00000003;
pub const VFT2_FONT_VECTOR: DWORD = 0x00000002;

pub const VS_FIXEDFILEINFO_SIGNATURE: DWORD = 0xFEEF04BD;
pub const VS_FIXEDFILEINFO_VERSION: DWORD = 0x00010000;


// https://docs.microsoft.com/en-us/windows/win32/menurc/resource-types

pub const RT_CURSOR: WORD = 0x01;
pub const RT_BITMAP: WORD = 0x02;
pub const RT_ICON: WORD = 0x03;
pub const RT_MENU: WORD = 0x04;
pub const RT_DIALOG: WORD = 0x05;
pub const RT_STRING: WORD = 0x06;
pub const RT_FONTDIR: WORD = 0x07;
pub const RT_FONT: WORD = 0x08;
pub const RT_ACCELERATOR: WORD = 0x09;
pub const RT_RCDATA: WORD = 0x0A;
pub const RT_MESSAGETABLE: WORD = 0x0B;
pub const RT_GROUP_CURSOR: WORD = 0x0C;
pub const RT_GROUP_ICON: WORD = 0x0E;
pub const RT_VERSION: WORD = 0x10;
pub const RT_DLGINCLUDE: WORD = 0x11;
pub const RT_PLUGPLAY: WORD = 0x13;
pub const RT_VXD: WORD = 0x14;
pub const RT_ANICURSOR: WORD = 0x15;
pub const RT_ANIICON: WORD = 0x16;
pub const RT_HTML: WORD = 0x17;
pub const RT_MANIFEST: WORD = 0x18;


pub const RT_DLGINIT: WORD = 0xF0;
pub const RT_TOOLBAR: WORD = 0xF1;

/// Script names of the predefined resource types.
pub static RESOURCE_TYPE_NAMES: &[(WORD, &str)] = &[
    (RT_CURSOR, "CURSOR"),
    (RT_BITMAP, "BITMAP"),
    (RT_ICON, "ICON"),
    (RT_MENU, "MENU"),
    (RT_DIALOG, "DIALOG"),
    (RT_STRING, "STRINGTABLE"),
    (RT_FONTDIR, "FONTDIR"),
    (RT_FONT, "FONT"),
    (RT_ACCELERATOR, "ACCELERATORS"),
    (RT_RCDATA, "RCDATA"),
    (RT_MESSAGETABLE, "MESSAGETABLE"),
    (RT_GROUP_CURSOR, "GROUP_CURSOR"),
    (RT_GROUP_ICON, "GROUP_ICON"),
    (RT_VERSION, "VERSIONINFO"),
    (RT_DLGINCLUDE, "DLGINCLUDE"),
    (RT_PLUGPLAY, "PLUGPLAY"),
    (RT_VXD, "VXD"),
    (RT_ANICURSOR, "ANICURSOR"),
    (RT_ANIICON, "ANIICON"),
    (RT_HTML, "HTML"),
    (RT_MANIFEST, "MANIFEST"),
    (RT_DLGINIT, "DLGINIT"),
    (RT_TOOLBAR, "TOOLBAR"),
];


// https://learn.microsoft.com/en-us/windows/win32/menurc/resourceheader

pub const MEMORY_FLAG_MOVEABLE: WORD = 0x0010;
pub const MEMORY_FLAG_PURE: WORD = 0x0020;
pub const MEMORY_FLAG_PRELOAD: WORD = 0x0040;
pub const MEMORY_FLAG_DISCARDABLE: WORD = 0x1000;
pub const MEMORY_FLAGS_DEFAULT: WORD =
    MEMORY_FLAG_MOVEABLE | MEMORY_FLAG_PURE | MEMORY_FLAG_DISCARDABLE;


// https://learn.microsoft.com/en-us/windows/win32/dlgbox/dialog-box-styles

pub const DS_ABSALIGN: DWORD = 0x0001;
pub const DS_SYSMODAL: DWORD = 0x0002;
pub const DS_LOCALEDIT: DWORD = 0x0020;
pub const DS_SETFONT: DWORD = 0x0040;
pub const DS_MODALFRAME: DWORD = 0x0080;
pub const DS_NOIDLEMSG: DWORD = 0x0100;
pub const DS_SETFOREGROUND: DWORD = 0x0200;
pub const DS_3DLOOK: DWORD = 0x0004;
pub const DS_FIXEDSYS: DWORD = 0x0008;
pub const DS_NOFAILCREATE: DWORD = 0x0010;
pub const DS_CONTROL: DWORD = 0x0400;
pub const DS_CENTER: DWORD = 0x0800;
pub const DS_CENTERMOUSE: DWORD = 0x1000;
pub const DS_CONTEXTHELP: DWORD = 0x2000;
pub const DS_SHELLFONT: DWORD = DS_SETFONT | DS_FIXEDSYS;

// https://learn.microsoft.com/en-us/windows/win32/dlgbox/dlgtemplateex
pub const DIALOG_EX_VERSION: WORD = 0x0001;
pub const DIALOG_EX_SIGNATURE: WORD = 0xFFFF;

// predefined control class atoms
pub const CONTROL_CLASS_BUTTON: WORD = 0x0080;
pub const CONTROL_CLASS_EDIT: WORD = 0x0081;
pub const CONTROL_CLASS_STATIC: WORD = 0x0082;
pub const CONTROL_CLASS_LISTBOX: WORD = 0x0083;
pub const CONTROL_CLASS_SCROLLBAR: WORD = 0x0084;
pub const CONTROL_CLASS_COMBOBOX: WORD = 0x0085;


// https://learn.microsoft.com/en-us/windows/win32/menurc/normalmenuitem-template

pub const MF_GRAYED: WORD = 0x0001;
pub const MF_DISABLED: WORD = 0x0002;
pub const MF_BITMAP: WORD = 0x0004;
pub const MF_CHECKED: WORD = 0x0008;
pub const MF_POPUP: WORD = 0x0010;
pub const MF_MENUBARBREAK: WORD = 0x0020;
pub const MF_MENUBREAK: WORD = 0x0040;
pub const MF_END: WORD = 0x0080;
pub const MF_OWNERDRAW: WORD = 0x0100;
pub const MF_SEPARATOR: WORD = 0x0800;
pub const MF_HELP: WORD = 0x4000;

// https://learn.microsoft.com/en-us/windows/win32/menurc/menuex-template-item

pub const MENU_EX_VERSION: WORD = 0x0001;
pub const MENU_EX_OFFSET: WORD = 0x0004;

pub const MFT_STRING: DWORD = 0x00000000;
pub const MFT_BITMAP: DWORD = 0x00000004;
pub const MFT_MENUBARBREAK: DWORD = 0x00000020;
pub const MFT_MENUBREAK: DWORD = 0x00000040;
pub const MFT_OWNERDRAW: DWORD = 0x00000100;
pub const MFT_RADIOCHECK: DWORD = 0x00000200;
pub const MFT_SEPARATOR: DWORD = 0x00000800;
pub const MFT_RIGHTORDER: DWORD = 0x00002000;
pub const MFT_RIGHTJUSTIFY: DWORD = 0x00004000;

pub const MFS_GRAYED: DWORD = 0x00000003;
pub const MFS_CHECKED: DWORD = 0x00000008;
pub const MFS_HILITE: DWORD = 0x00000080;
pub const MFS_DEFAULT: DWORD = 0x00001000;

pub const MENU_EX_POPUP: WORD = 0x0001;
pub const MENU_EX_LAST: WORD = 0x0080;


// https://learn.microsoft.com/en-us/windows/win32/menurc/acceltableentry

pub const FVIRTKEY: u8 = 0x01;
pub const FNOINVERT: u8 = 0x02;
pub const FSHIFT: u8 = 0x04;
pub const FCONTROL: u8 = 0x08;
pub const FALT: u8 = 0x10;
pub const ACCEL_LAST_ENTRY: u8 = 0x80;


// https://learn.microsoft.com/en-us/windows/win32/inputdev/virtual-key-codes
// letters and digits share their ASCII codes and are not listed

pub static VIRTUAL_KEYS: &[(&str, WORD)] = &[
    ("VK_LBUTTON", 0x01),
    ("VK_RBUTTON", 0x02),
    ("VK_CANCEL", 0x03),
    ("VK_MBUTTON", 0x04),
    ("VK_BACK", 0x08),
    ("VK_TAB", 0x09),
    ("VK_CLEAR", 0x0C),
    ("VK_RETURN", 0x0D),
    ("VK_SHIFT", 0x10),
    ("VK_CONTROL", 0x11),
    ("VK_MENU", 0x12),
    ("VK_PAUSE", 0x13),
    ("VK_CAPITAL", 0x14),
    ("VK_ESCAPE", 0x1B),
    ("VK_SPACE", 0x20),
    ("VK_PRIOR", 0x21),
    ("VK_NEXT", 0x22),
    ("VK_END", 0x23),
    ("VK_HOME", 0x24),
    ("VK_LEFT", 0x25),
    ("VK_UP", 0x26),
    ("VK_RIGHT", 0x27),
    ("VK_DOWN", 0x28),
    ("VK_SELECT", 0x29),
    ("VK_PRINT", 0x2A),
    ("VK_EXECUTE", 0x2B),
    ("VK_SNAPSHOT", 0x2C),
    ("VK_INSERT", 0x2D),
    ("VK_DELETE", 0x2E),
    ("VK_HELP", 0x2F),
    ("VK_LWIN", 0x5B),
    ("VK_RWIN", 0x5C),
    ("VK_APPS", 0x5D),
    ("VK_SLEEP", 0x5F),
    ("VK_NUMPAD0", 0x60),
    ("VK_NUMPAD1", 0x61),
    ("VK_NUMPAD2", 0x62),
    ("VK_NUMPAD3", 0x63),
    ("VK_NUMPAD4", 0x64),
    ("VK_NUMPAD5", 0x65),
    ("VK_NUMPAD6", 0x66),
    ("VK_NUMPAD7", 0x67),
    ("VK_NUMPAD8", 0x68),
    ("VK_NUMPAD9", 0x69),
    ("VK_MULTIPLY", 0x6A),
    ("VK_ADD", 0x6B),
    ("VK_SEPARATOR", 0x6C),
    ("VK_SUBTRACT", 0x6D),
    ("VK_DECIMAL", 0x6E),
    ("VK_DIVIDE", 0x6F),
    ("VK_F1", 0x70),
    ("VK_F2", 0x71),
    ("VK_F3", 0x72),
    ("VK_F4", 0x73),
    ("VK_F5", 0x74),
    ("VK_F6", 0x75),
    ("VK_F7", 0x76),
    ("VK_F8", 0x77),
    ("VK_F9", 0x78),
    ("VK_F10", 0x79),
    ("VK_F11", 0x7A),
    ("VK_F12", 0x7B),
    ("VK_F13", 0x7C),
    ("VK_F14", 0x7D),
    ("VK_F15", 0x7E),
    ("VK_F16", 0x7F),
    ("VK_F17", 0x80),
    ("VK_F18", 0x81),
    ("VK_F19", 0x82),
    ("VK_F20", 0x83),
    ("VK_F21", 0x84),
    ("VK_F22", 0x85),
    ("VK_F23", 0x86),
    ("VK_F24", 0x87),
    ("VK_NUMLOCK", 0x90),
    ("VK_SCROLL", 0x91),
    ("VK_LSHIFT", 0xA0),
    ("VK_RSHIFT", 0xA1),
    ("VK_LCONTROL", 0xA2),
    ("VK_RCONTROL", 0xA3),
    ("VK_LMENU", 0xA4),
    ("VK_RMENU", 0xA5),
    ("VK_OEM_1", 0xBA),
    ("VK_OEM_PLUS", 0xBB),
    ("VK_OEM_COMMA", 0xBC),
    ("VK_OEM_MINUS", 0xBD),
    ("VK_OEM_PERIOD", 0xBE),
    ("VK_OEM_2", 0xBF),
    ("VK_OEM_3", 0xC0),
    ("VK_OEM_4", 0xDB),
    ("VK_OEM_5", 0xDC),
    ("VK_OEM_6", 0xDD),
    ("VK_OEM_7", 0xDE),
];
