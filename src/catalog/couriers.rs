/// A courier offered by Biteship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourierInfo {
    pub code: &'static str,
    pub name: &'static str,
}

/// A courier service, keyed by `courier.service`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

impl ServiceInfo {
    pub fn courier_code(&self) -> &'static str {
        self.code.split_once('.').map(|(c, _)| c).unwrap_or(self.code)
    }

    pub fn service_code(&self) -> &'static str {
        self.code.split_once('.').map(|(_, s)| s).unwrap_or(self.code)
    }
}

macro_rules! courier {
    ($code:expr, $name:expr) => {
        CourierInfo { code: $code, name: $name }
    };
}

macro_rules! service {
    ($code:expr, $name:expr, $description:expr) => {
        ServiceInfo { code: $code, name: $name, description: $description }
    };
}

pub const COURIERS: &[CourierInfo] = &[
    courier!("gojek", "GoJek"),
    courier!("grab", "Grab"),
    courier!("deliveree", "Deliveree"),
    courier!("jne", "JNE"),
    courier!("tiki", "TIKI"),
    courier!("ninja", "Ninja Express"),
    courier!("lion", "Lion Parcel"),
    courier!("rara", "Rara"),
    courier!("sicepat", "SiCepat"),
    courier!("jnt", "J&T Express"),
    courier!("idexpress", "ID Express"),
    courier!("rpx", "RPX"),
    courier!("jdl", "JDL"),
    courier!("wahana", "Wahana"),
    courier!("pos", "Pos Indonesia"),
    courier!("anteraja", "AnterAja"),
    courier!("sap", "SAP Express"),
    courier!("paxel", "Paxel"),
    courier!("borzo", "Borzo"),
    courier!("lalamove", "Lalamove"),
];

pub const SERVICES: &[ServiceInfo] = &[
    service!("gojek.instant", "GoJek - Instant", "On Demand Instant (bike)"),
    service!("gojek.same_day", "GoJek - Same Day", "On Demand within 8 hours (bike)"),
    service!("grab.instant", "Grab - Instant", "On Demand Instant (bike)"),
    service!("grab.same_day", "Grab - Same Day", "On Demand within 8 hours (bike)"),
    service!("grab.instant_car", "Grab - Instant Car", "Grab Car Express"),
    service!("deliveree.tronton_wing_box", "Deliveree - Tronton Wing Box", "Tronton Wing Box"),
    service!("deliveree.tronton_box", "Deliveree - Tronton Box", "Tronton Box"),
    service!("deliveree.fuso_heavy", "Deliveree - Fuso Heavy", "Fuso Heavy"),
    service!("deliveree.fuso_light", "Deliveree - Fuso Lite", "Fuso Lite"),
    service!("deliveree.cdd_box", "Deliveree - CDD Box", "CDD Box"),
    service!("deliveree.cdd_pickup", "Deliveree - CDD Pickup", "CDD Pickup"),
    service!("deliveree.cde_frozen", "Deliveree - CDE - Frozen", "CDE - Frozen"),
    service!("deliveree.cde_flammable", "Deliveree - CDE - Flammable", "CDE - Flammable"),
    service!("deliveree.cde_chemical", "Deliveree - CDE - Chemical", "CDE - Chemical"),
    service!("deliveree.engkel_box", "Deliveree - Engkel Box", "Engkel Box"),
    service!("deliveree.engkel_pickup", "Deliveree - Engkel Pickup", "Engkel Pickup"),
    service!("deliveree.small_box", "Deliveree - Small Box", "Small Box"),
    service!("deliveree.pickup", "Deliveree - Pickup", "Pickup"),
    service!("deliveree.van", "Deliveree - Van", "Van"),
    service!("deliveree.economy", "Deliveree - Economy", "Economy"),
    service!("jne.reg", "JNE - Reguler", "Regular service"),
    service!("jne.yes", "JNE - YES", "Express, next day"),
    service!("jne.oke", "JNE - OKE", "Economy service"),
    service!("jne.jtr", "JNE - JTR", "Trucking with minimum weight of 10 kg"),
    service!("jne.jtr_150_250", "JNE - JTR 150 250", "Trucking for motorbike with 150cc to 250cc"),
    service!("jne.jtr_150", "JNE - JTR 150", "Trucking for motorbike below 150cc"),
    service!("jne.jtr_250", "JNE - JTR 250", "Trucking for motorbike above 250cc"),
    service!("tiki.eko", "TIKI - EKO", "Economic service"),
    service!("tiki.sds", "TIKI - SDS", "Same day service"),
    service!("tiki.reg", "TIKI - REG", "Layanan reguler"),
    service!("tiki.ons", "TIKI - ONS", "One night service"),
    service!("tiki.t15", "TIKI - T15", "Motor di bawah 150CC"),
    service!("tiki.t25", "TIKI - T25", "Motor di bawah 250CC"),
    service!("tiki.t60", "TIKI - T60", "Motor di bawah 600CC"),
    service!("tiki.trc", "TIKI - Trucking", "TIKI Trucking"),
    service!("ninja.standard", "Ninja - Standard", "Layanan standard"),
    service!("lion.reg_pack", "Lion - Reg Pack", "Layanan standard"),
    service!("lion.land_pack", "Lion - Land Pack", "Pengiriman menggunakan kereta api"),
    service!("lion.one_pack", "Lion - One Pack", "Layanan besok sampai"),
    service!("lion.jago_pack", "Lion - Jago Pack", "Pengiriman standard"),
    service!("lion.docu_pack", "Lion - Docu Pack", "Pengiriman dokumen"),
    service!("lion.big_pack", "Lion - Big Pack", "Layanan trucking Lion Parcel"),
    service!("rara.instant", "Rara - Instant", "Instant delivery service"),
    service!("sicepat.reg", "SiCepat - Reguler", "Layanan reguler"),
    service!("sicepat.best", "SiCepat - Best", "Besok sampai tujuan"),
    service!("sicepat.sds", "SiCepat - SDS", "Same day service"),
    service!("sicepat.gokil", "SiCepat - GOKIL", "Layanan kargo"),
    service!("jnt.ez", "J&T - EZ", "Layanan reguler"),
    service!("idexpress.reg", "ID Express - Reguler", "Layanan reguler"),
    service!("idexpress.smd", "ID Express - Same Day", "Layanan Same Day"),
    service!("idexpress.idtruck", "ID Express - ID Truck", "Layanan Trucking"),
    service!("rpx.sdp", "RPX - Same Day Package", "Layanan sampai di hari yang sama"),
    service!("rpx.mdp", "RPX - Mid Day Package", "Layanan tiba sebelum jam 12 siang esoknya"),
    service!("rpx.ndp", "RPX - Next Day Package", "Layanan sampai 1 hari kerja"),
    service!("rpx.rgp", "RPX - Reguler Package", "Pengiriman standard"),
    service!("rpx.pas", "RPX - Paket Ambil Suka-suka", "Pengambilan barang mandiri di lokasi mitra RPX"),
    service!("rpx.ecp", "RPX - Economy Delivery", "Kirim paket >10 kg dengan biaya hemat"),
    service!("rpx.hwp", "RPX - Heavy Weight Delivery", "Kirim paket >20 kg dengan biaya hemat"),
    service!("jdl.reg", "JDL - Reguler", "Regular shipment"),
    service!("wahana.normal", "Wahana - Normal", "Layanan standard"),
    service!("pos.kilat_khusus", "Pos - Kilat Khusus", "Layanan kilat khusus"),
    service!("pos.q9_same_day", "Pos - Q9 Same Day", "Layanan max 9 jam sampai. Cut off pukul 16:00"),
    service!("pos.same_day", "Pos - Same Day", "Layanan sampai di hari yang sama"),
    service!("pos.next_day", "Pos - Next Day", "Layanan paket besok sampai"),
    service!("pos.jumbo_ekonomi", "Pos - Jumbo Ekonomi", "Layanan dengan tarif tingkat berat pertama mulai dari 3kg - 30kg"),
    service!("anteraja.reg", "AnterAja - Reguler", "Regular shipment"),
    service!("anteraja.same_day", "AnterAja - Same Day", "Same day service for Jakarta Area"),
    service!("anteraja.next_day", "AnterAja - Next Day", "Next day service delivery"),
    service!("sap.reg", "SAP - REG", "Regular service"),
    service!("sap.ods", "SAP - ODS", "One Day Service"),
    service!("sap.sds", "SAP - SDS", "Same Day Service"),
    service!("sap.cargo", "SAP - Cargo", "Cargo Land Service"),
    service!("paxel.small", "Paxel - Small Package", "Layanan paket small"),
    service!("paxel.medium", "Paxel - Medium Package", "Layanan paket medium"),
    service!("paxel.large", "Paxel - Large Package", "Layanan paket large"),
    service!("paxel.paxel_big", "Paxel - Paxel Big", "Layanan kargo paxel big"),
    service!("borzo.instant_bike", "Borzo - Instant Bike", "Delivery using bike"),
    service!("borzo.instant_car", "Borzo - Instant Car", "Delivery using car"),
    service!("lalamove.motorcycle", "Lalamove - Motorcycle", "Layanan dapat digunakan dengan berat mulai dari 0 kg sampai 20 kg"),
    service!("lalamove.mpv", "Lalamove - MPV", "Layanan dapat digunakan dengan berat mulai dari 0 kg sampai 200 kg"),
    service!("lalamove.van", "Lalamove - Van", "Layanan dapat digunakan dengan berat mulai dari 200 kg sampai 600 kg"),
    service!("lalamove.truck", "Lalamove - Truck", "Layanan dapat digunakan dengan berat mulai dari 600 kg sampai 800 kg"),
    service!("lalamove.cdd_bak", "Lalamove - Cdd Bak", "Layanan dapat digunakan dengan berat mulai dari 2500 kg sampai 5000 kg"),
    service!("lalamove.cdd_box", "Lalamove - Cdd Box", "Layanan dapat digunakan dengan berat mulai dari 2500 kg sampai 5000 kg"),
    service!("lalamove.engkel_box", "Lalamove - Engkel Box", "Layanan dapat digunakan dengan berat mulai dari 1000 kg sampai 2000 kg"),
    service!("lalamove.engkel_bak", "Lalamove - Engkel Bak", "Layanan dapat digunakan dengan berat mulai dari 2000 kg sampai 2500 kg"),
];
