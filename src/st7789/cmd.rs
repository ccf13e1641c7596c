//! Command bytes of the ST7789 instruction set.

/// ST7789 command bytes, sent with the DC line low.
pub struct Cmd;
#[allow(missing_docs)]
impl Cmd {
    // System function commands
    pub const NOP: u8 = 0x00;
    pub const SWRESET: u8 = 0x01; // Software reset
    pub const RDDID: u8 = 0x04;
    pub const RDDST: u8 = 0x09;
    pub const RDDPM: u8 = 0x0A;
    pub const RDDMADCTL: u8 = 0x0B;
    pub const RDDCOLMOD: u8 = 0x0C;
    pub const RDDIM: u8 = 0x0D;
    pub const RDDSM: u8 = 0x0E;
    pub const RDDSDR: u8 = 0x0F;

    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const PTLON: u8 = 0x12;
    pub const NORON: u8 = 0x13;

    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const GAMSET: u8 = 0x26;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A; // Column address set
    pub const RASET: u8 = 0x2B; // Row address set
    pub const RAMWR: u8 = 0x2C; // Memory write
    pub const RAMRD: u8 = 0x2E;

    pub const PTLAR: u8 = 0x30;
    pub const VSCRDEF: u8 = 0x33;
    pub const TEOFF: u8 = 0x34;
    pub const TEON: u8 = 0x35;
    pub const MADCTL: u8 = 0x36; // Memory data access control (orientation)
    pub const VSCRSADD: u8 = 0x37;
    pub const IDMOFF: u8 = 0x38;
    pub const IDMON: u8 = 0x39;
    pub const COLMOD: u8 = 0x3A; // Interface pixel format
    pub const RAMWRC: u8 = 0x3C;
    pub const RAMRDC: u8 = 0x3E;

    pub const TESCAN: u8 = 0x44;
    pub const RDTESCAN: u8 = 0x45;

    pub const WRDISBV: u8 = 0x51;
    pub const RDDISBV: u8 = 0x52;
    pub const WRCTRLD: u8 = 0x53;
    pub const RDCTRLD: u8 = 0x54;
    pub const WRCACE: u8 = 0x55;
    pub const RDCABC: u8 = 0x56;
    pub const WRCABCMB: u8 = 0x5E;
    pub const RDCABCMB: u8 = 0x5F;

    pub const RDABCSDR: u8 = 0x68;

    pub const RDID1: u8 = 0xDA;
    pub const RDID2: u8 = 0xDB;
    pub const RDID3: u8 = 0xDC;

    // Panel function commands
    pub const RAMCTRL: u8 = 0xB0;
    pub const RGBCTRL: u8 = 0xB1;
    pub const PORCTRL: u8 = 0xB2; // Porch setting
    pub const FRCTRL1: u8 = 0xB3;

    pub const GCTRL: u8 = 0xB7; // Gate control
    pub const DGMEN: u8 = 0xBA;
    pub const VCOMS: u8 = 0xBB;

    pub const POWSAVE: u8 = 0xBC;
    pub const DLPOFFSAVE: u8 = 0xBD;

    pub const LCMCTRL: u8 = 0xC0;
    pub const IDSET: u8 = 0xC1;
    pub const VDVVRHEN: u8 = 0xC2;
    pub const VRHS: u8 = 0xC3;
    pub const VDVSET: u8 = 0xC4;
    pub const VCMOFSET: u8 = 0xC5;
    pub const FRCTR2: u8 = 0xC6; // Frame rate control in normal mode
    pub const CABCCTRL: u8 = 0xC7;
    pub const REGSEL1: u8 = 0xC8;
    pub const REGSEL2: u8 = 0xCA;
    pub const PWMFRSEL: u8 = 0xCC;

    pub const PWCTRL1: u8 = 0xD0; // Power control 1
    pub const VAPVANEN: u8 = 0xD2;
    pub const PVGAMCTRL: u8 = 0xE0; // Positive voltage gamma
    pub const NVGAMCTRL: u8 = 0xE1; // Negative voltage gamma
    pub const DGMLUTR: u8 = 0xE2;
    pub const DGMLUTB: u8 = 0xE3;
    pub const GATECTRL: u8 = 0xE4;
    pub const PWCTRL2: u8 = 0xE8;
    pub const EQCTRL: u8 = 0xE9;
    pub const PROMCTRL: u8 = 0xEC;
    pub const PROMEN: u8 = 0xFA;
    pub const NVMSET: u8 = 0xFC;
    pub const PROMACT: u8 = 0xFE;

    /// Command 2 enable key 0xDF5A6902, in wire order
    pub const CMD2EN: [u8; 4] = [0xDF, 0x5A, 0x69, 0x02];
}

/*
Init order used by the panel vendor sample:
0x11 - Sleep out (wait 150ms)
0x36 - Memory data access control
0x3A - Interface pixel format
0xB2 - Porch setting
0xB7 - Gate control
0xBB - VCOM setting
0xC0 - LCM control
0xC2 - VDV and VRH command enable
0xC3 - VRH set
0xC4 - VDV set
0xC6 - Frame rate control
0xD0 - Power control 1
0x21 - Display inversion on
0xE0 - Positive gamma
0xE1 - Negative gamma
0x29 - Display on (wait 100ms)
*/
